//! Storage adapters: one trait per entity, implemented over PostgreSQL and in memory.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::model::{Category, Ingredient, Menu, MenuIngredient, NamedEntity};
use async_trait::async_trait;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Categories and ingredients.
#[async_trait]
pub trait NamedRepository<E: NamedEntity>: Send + Sync {
    /// All rows ordered by id, optionally filtered by case-insensitive name substring.
    async fn all(&self, name: Option<&str>) -> Result<Vec<E>, AppError>;
    async fn find(&self, id: i32) -> Result<Option<E>, AppError>;
    /// Rows whose id is in `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<E>, AppError>;
    async fn create(&self, name: &str) -> Result<E, AppError>;
    async fn update(&self, entity: &E) -> Result<E, AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

pub type CategoryRepository = dyn NamedRepository<Category>;
pub type IngredientRepository = dyn NamedRepository<Ingredient>;

/// Bare menu rows; relations are attached by the menu service.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn all(&self, name: Option<&str>) -> Result<Vec<Menu>, AppError>;
    async fn find(&self, id: i32) -> Result<Option<Menu>, AppError>;
    async fn create(&self, name: &str, category_id: i32) -> Result<Menu, AppError>;
    async fn update(&self, menu: &Menu) -> Result<Menu, AppError>;
    /// Also removes the menu's recipe rows.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<MenuIngredient>, AppError>;
    /// Recipe rows of the given menus, in creation order.
    async fn for_menus(&self, menu_ids: &[i32]) -> Result<Vec<MenuIngredient>, AppError>;
    async fn create(&self, menu_id: i32, ingredient_id: i32, qty: &str) -> Result<MenuIngredient, AppError>;
    async fn update(&self, recipe: &MenuIngredient) -> Result<MenuIngredient, AppError>;
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Case-insensitive substring match used by the in-memory adapter; mirrors `ILIKE '%needle%'`.
pub(crate) fn name_matches(name: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::name_matches;

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        assert!(name_matches("Category 10", Some("category 1")));
        assert!(name_matches("Iced Tea", Some("TEA")));
        assert!(!name_matches("category 2", Some("category 1")));
        assert!(name_matches("anything", None));
    }
}
