//! Use-case layer: referential checks and DTO assembly over the storage adapters.

mod catalog;
mod menu;
mod recipe;

pub use catalog::{CatalogService, CategoryService, IngredientService};
pub use menu::MenuService;
pub use recipe::RecipeService;
