//! Category and ingredient handlers, shared through [`Catalog`].

use crate::error::AppError;
use crate::model::{Category, Ingredient, NamedEntity};
use crate::request::{IdParam, ListQuery, NameRequest, Validate};
use crate::response::respond;
use crate::service::CatalogService;
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

/// Picks the service for an entity out of the shared state.
pub trait Catalog: NamedEntity {
    fn service(state: &AppState) -> &CatalogService<Self>;
}

impl Catalog for Category {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.categories
    }
}

impl Catalog for Ingredient {
    fn service(state: &AppState) -> &CatalogService<Self> {
        &state.ingredients
    }
}

pub async fn list<E: Catalog>(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let action = format!("get all {}", E::LABEL);
    let result = async {
        let Query(query) = query?;
        E::service(&state).list(query.name_filter()).await
    };
    respond(&action, StatusCode::OK, result.await)
}

pub async fn get<E: Catalog>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Response {
    let action = format!("get detail {}", E::LABEL);
    let result = async {
        let Path(id) = id?;
        IdParam(id).validate()?;
        E::service(&state).get(id).await
    };
    respond(&action, StatusCode::OK, result.await)
}

pub async fn create<E: Catalog>(
    State(state): State<AppState>,
    body: Result<Json<NameRequest>, JsonRejection>,
) -> Response {
    let action = format!("create {}", E::LABEL);
    let result = async {
        let Json(body) = body?;
        body.validate()?;
        E::service(&state).create(&body).await
    };
    respond(&action, StatusCode::CREATED, result.await)
}

pub async fn update<E: Catalog>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<NameRequest>, JsonRejection>,
) -> Response {
    let action = format!("update {}", E::LABEL);
    let result = async {
        let Path(id) = id?;
        let Json(body) = body?;
        IdParam(id).validate()?;
        body.validate()?;
        E::service(&state).update(id, &body).await
    };
    respond(&action, StatusCode::CREATED, result.await)
}

pub async fn delete<E: Catalog>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Response {
    let action = format!("delete {}", E::LABEL);
    let result = async {
        let Path(id) = id?;
        IdParam(id).validate()?;
        E::service(&state).delete(id).await?;
        Ok::<_, AppError>(())
    };
    respond(&action, StatusCode::OK, result.await)
}
