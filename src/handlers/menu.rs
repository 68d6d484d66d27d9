//! Menu handlers.

use crate::error::AppError;
use crate::request::{IdParam, ListQuery, MenuRequest, Validate};
use crate::response::respond;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};

pub async fn list(State(state): State<AppState>, query: Result<Query<ListQuery>, QueryRejection>) -> Response {
    let result = async {
        let Query(query) = query?;
        state.menus.list(query.name_filter()).await
    };
    respond("get menu", StatusCode::OK, result.await)
}

pub async fn get(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Response {
    let result = async {
        let Path(id) = id?;
        IdParam(id).validate()?;
        state.menus.get(id).await
    };
    respond("get detail menu", StatusCode::OK, result.await)
}

pub async fn create(State(state): State<AppState>, body: Result<Json<MenuRequest>, JsonRejection>) -> Response {
    let result = async {
        let Json(body) = body?;
        body.validate()?;
        state.menus.create(&body).await
    };
    respond("create menu", StatusCode::CREATED, result.await)
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<MenuRequest>, JsonRejection>,
) -> Response {
    let result = async {
        let Path(id) = id?;
        let Json(body) = body?;
        IdParam(id).validate()?;
        body.validate()?;
        state.menus.update(id, &body).await
    };
    respond("update menu", StatusCode::CREATED, result.await)
}

pub async fn delete(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Response {
    let result = async {
        let Path(id) = id?;
        IdParam(id).validate()?;
        state.menus.delete(id).await?;
        Ok::<_, AppError>(())
    };
    respond("delete menu", StatusCode::OK, result.await)
}
