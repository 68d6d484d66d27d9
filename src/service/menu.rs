//! Menu aggregation: resolves the category on write and composes
//! menu + category + recipe lines + ingredients on read.

use crate::dto::MenuResponse;
use crate::error::AppError;
use crate::model::{Category, Ingredient, Menu};
use crate::repository::{CategoryRepository, IngredientRepository, MenuRepository, RecipeRepository};
use crate::request::MenuRequest;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

#[derive(Clone)]
pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
    categories: Arc<CategoryRepository>,
    recipes: Arc<dyn RecipeRepository>,
    ingredients: Arc<IngredientRepository>,
}

impl MenuService {
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        categories: Arc<CategoryRepository>,
        recipes: Arc<dyn RecipeRepository>,
        ingredients: Arc<IngredientRepository>,
    ) -> Self {
        MenuService {
            menus,
            categories,
            recipes,
            ingredients,
        }
    }

    pub async fn list(&self, name: Option<&str>) -> Result<Vec<MenuResponse>, AppError> {
        let menus = self.menus.all(name).await?;
        let menus = self.eager_load(menus).await?;
        Ok(menus.iter().map(MenuResponse::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<MenuResponse, AppError> {
        let menu = self.find(id).await?;
        let menus = self.eager_load(vec![menu]).await?;
        menus
            .first()
            .map(MenuResponse::from)
            .ok_or_else(|| AppError::not_found("menu", id))
    }

    pub async fn create(&self, req: &MenuRequest) -> Result<MenuResponse, AppError> {
        let category = self.resolve_category(req.category_id).await?;
        let mut menu = self.menus.create(&req.name, category.id).await?;
        tracing::info!(id = menu.id, category_id = category.id, "menu created");
        menu.category = Some(category);
        Ok(MenuResponse::from(&menu))
    }

    /// Overwrites name and category; existing recipe lines are kept and returned.
    pub async fn update(&self, id: i32, req: &MenuRequest) -> Result<MenuResponse, AppError> {
        let mut menu = self.find(id).await?;
        let category = self.resolve_category(req.category_id).await?;
        menu.name = req.name.clone();
        menu.category_id = category.id;
        let saved = self.menus.update(&menu).await?;
        let menus = self.eager_load(vec![saved]).await?;
        menus
            .first()
            .map(MenuResponse::from)
            .ok_or_else(|| AppError::not_found("menu", id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let menu = self.find(id).await?;
        self.menus.delete(menu.id).await
    }

    async fn find(&self, id: i32) -> Result<Menu, AppError> {
        self.menus
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("menu", id))
    }

    async fn resolve_category(&self, id: i32) -> Result<Category, AppError> {
        self.categories
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("category", id))
    }

    /// Attach categories, recipe rows and their ingredients with one query per relation.
    async fn eager_load(&self, mut menus: Vec<Menu>) -> Result<Vec<Menu>, AppError> {
        if menus.is_empty() {
            return Ok(menus);
        }
        let category_ids: Vec<i32> = menus
            .iter()
            .map(|m| m.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories: HashMap<i32, Category> = self
            .categories
            .find_many(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let menu_ids: Vec<i32> = menus.iter().map(|m| m.id).collect();
        let recipes = self.recipes.for_menus(&menu_ids).await?;

        let ingredient_ids: Vec<i32> = recipes
            .iter()
            .map(|r| r.ingredient_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ingredients: HashMap<i32, Ingredient> = self
            .ingredients
            .find_many(&ingredient_ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();

        let mut by_menu: HashMap<i32, Vec<_>> = HashMap::new();
        for mut recipe in recipes {
            recipe.ingredient = ingredients.get(&recipe.ingredient_id).cloned();
            by_menu.entry(recipe.menu_id).or_default().push(recipe);
        }

        for menu in &mut menus {
            menu.category = categories.get(&menu.category_id).cloned();
            menu.ingredients = by_menu.remove(&menu.id).unwrap_or_default();
        }
        Ok(menus)
    }
}
