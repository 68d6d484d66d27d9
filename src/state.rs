//! Shared application state for all routes.

use crate::model::{Category, Ingredient};
use crate::repository::{MemoryRepository, MenuRepository, NamedRepository, PgRepository, RecipeRepository};
use crate::service::{CategoryService, IngredientService, MenuService, RecipeService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Present for the PostgreSQL backend; used by the readiness probe.
    pub pool: Option<PgPool>,
    pub categories: CategoryService,
    pub ingredients: IngredientService,
    pub menus: MenuService,
    pub recipes: RecipeService,
}

impl AppState {
    pub fn postgres(repo: PgRepository) -> Self {
        let pool = repo.pool().clone();
        let mut state = Self::wire(Arc::new(repo));
        state.pool = Some(pool);
        state
    }

    pub fn in_memory() -> Self {
        Self::wire(Arc::new(MemoryRepository::new()))
    }

    fn wire<R>(repo: Arc<R>) -> Self
    where
        R: NamedRepository<Category> + NamedRepository<Ingredient> + MenuRepository + RecipeRepository + 'static,
    {
        AppState {
            pool: None,
            categories: CategoryService::new(repo.clone()),
            ingredients: IngredientService::new(repo.clone()),
            menus: MenuService::new(repo.clone(), repo.clone(), repo.clone(), repo.clone()),
            recipes: RecipeService::new(repo.clone(), repo.clone(), repo),
        }
    }
}
