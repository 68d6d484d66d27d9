//! Recipe (menu-ingredient) aggregation.

use crate::error::AppError;
use crate::model::{Ingredient, Menu, MenuIngredient};
use crate::repository::{IngredientRepository, MenuRepository, RecipeRepository};
use crate::request::RecipeRequest;
use std::sync::Arc;

#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    menus: Arc<dyn MenuRepository>,
    ingredients: Arc<IngredientRepository>,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        menus: Arc<dyn MenuRepository>,
        ingredients: Arc<IngredientRepository>,
    ) -> Self {
        RecipeService {
            recipes,
            menus,
            ingredients,
        }
    }

    /// Menu is resolved before ingredient; nothing is written unless both exist.
    pub async fn create(&self, req: &RecipeRequest) -> Result<MenuIngredient, AppError> {
        let menu = self.resolve_menu(req.menu_id).await?;
        let ingredient = self.resolve_ingredient(req.ingredient_id).await?;
        let mut recipe = self.recipes.create(menu.id, ingredient.id, &req.qty).await?;
        tracing::info!(id = recipe.id, menu_id = menu.id, ingredient_id = ingredient.id, "recipe created");
        recipe.ingredient = Some(ingredient);
        Ok(recipe)
    }

    pub async fn update(&self, id: i32, req: &RecipeRequest) -> Result<MenuIngredient, AppError> {
        let mut recipe = self.find(id).await?;
        let ingredient = self.resolve_ingredient(req.ingredient_id).await?;
        let menu = self.resolve_menu(req.menu_id).await?;
        recipe.menu_id = menu.id;
        recipe.ingredient_id = ingredient.id;
        recipe.qty = req.qty.clone();
        let mut saved = self.recipes.update(&recipe).await?;
        saved.ingredient = Some(ingredient);
        Ok(saved)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let recipe = self.find(id).await?;
        self.recipes.delete(recipe.id).await
    }

    async fn find(&self, id: i32) -> Result<MenuIngredient, AppError> {
        self.recipes
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("recipe", id))
    }

    async fn resolve_menu(&self, id: i32) -> Result<Menu, AppError> {
        self.menus
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("menu", id))
    }

    async fn resolve_ingredient(&self, id: i32) -> Result<Ingredient, AppError> {
        self.ingredients
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("ingredient", id))
    }
}
