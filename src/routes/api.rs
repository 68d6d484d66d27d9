//! Resource routes, nested under `/api/v1` by [`super::app`].

use crate::handlers::{catalog, menu, recipe};
use crate::model::{Category, Ingredient};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/category", get(catalog::list::<Category>).post(catalog::create::<Category>))
        .route(
            "/category/:id",
            get(catalog::get::<Category>)
                .put(catalog::update::<Category>)
                .delete(catalog::delete::<Category>),
        )
        .route("/ingredient", get(catalog::list::<Ingredient>).post(catalog::create::<Ingredient>))
        .route(
            "/ingredient/:id",
            get(catalog::get::<Ingredient>)
                .put(catalog::update::<Ingredient>)
                .delete(catalog::delete::<Ingredient>),
        )
        .route("/menu", get(menu::list).post(menu::create))
        .route("/menu/:menu_id", get(menu::get).put(menu::update).delete(menu::delete))
        .route("/menu/:menu_id/recipe", post(recipe::create))
        .route("/menu/:menu_id/recipe/:id", put(recipe::update).delete(recipe::delete))
        .with_state(state)
}
