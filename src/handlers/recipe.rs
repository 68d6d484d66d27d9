//! Recipe handlers nested under a menu: `/menu/:menu_id/recipe[/:id]`.

use crate::error::AppError;
use crate::request::{IdParam, RecipeBody, RecipePath, RecipeRequest, Validate};
use crate::response::respond;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};

pub async fn create(
    State(state): State<AppState>,
    menu_id: Result<Path<i32>, PathRejection>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Response {
    let result = async {
        let Path(menu_id) = menu_id?;
        let Json(body) = body?;
        let req = RecipeRequest::new(menu_id, body);
        req.validate()?;
        state.recipes.create(&req).await
    };
    respond("create menu recipes", StatusCode::CREATED, result.await)
}

pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<RecipePath>, PathRejection>,
    body: Result<Json<RecipeBody>, JsonRejection>,
) -> Response {
    let result = async {
        let Path(path) = path?;
        let Json(body) = body?;
        let req = RecipeRequest::new(path.menu_id, body);
        IdParam(path.id).validate()?;
        req.validate()?;
        state.recipes.update(path.id, &req).await
    };
    respond("update menu recipes", StatusCode::CREATED, result.await)
}

pub async fn delete(State(state): State<AppState>, path: Result<Path<RecipePath>, PathRejection>) -> Response {
    let result = async {
        let Path(path) = path?;
        IdParam(path.id).validate()?;
        state.recipes.delete(path.id).await?;
        Ok::<_, AppError>(())
    };
    respond("delete menu recipes", StatusCode::CREATED, result.await)
}
