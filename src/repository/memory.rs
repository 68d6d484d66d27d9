//! In-memory adapter for tests and `STORAGE=memory`.
//!
//! Not durable: all rows are lost when the process exits. Ids are assigned
//! from a per-table sequence and never reused, like `SERIAL` columns.

use super::{name_matches, MenuRepository, NamedRepository, RecipeRepository};
use crate::error::AppError;
use crate::model::{Menu, MenuIngredient, NamedEntity};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

#[derive(Default)]
struct Tables {
    /// Category and ingredient names keyed by table then id.
    named: HashMap<&'static str, BTreeMap<i32, String>>,
    menus: BTreeMap<i32, Menu>,
    recipes: BTreeMap<i32, MenuIngredient>,
    sequences: HashMap<&'static str, i32>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i32 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

fn poison_err<T>(_: PoisonError<T>) -> AppError {
    AppError::Storage("lock poisoned".into())
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<E: NamedEntity> NamedRepository<E> for MemoryRepository {
    async fn all(&self, name: Option<&str>) -> Result<Vec<E>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables
            .named
            .get(E::TABLE)
            .map(|rows| {
                rows.iter()
                    .filter(|(_, n)| name_matches(n, name))
                    .map(|(id, n)| E::new(*id, n.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find(&self, id: i32) -> Result<Option<E>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables
            .named
            .get(E::TABLE)
            .and_then(|rows| rows.get(&id))
            .map(|n| E::new(id, n.clone())))
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<E>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        let Some(rows) = tables.named.get(E::TABLE) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, n)| E::new(*id, n.clone()))
            .collect())
    }

    async fn create(&self, name: &str) -> Result<E, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let id = tables.next_id(E::TABLE);
        tables
            .named
            .entry(E::TABLE)
            .or_default()
            .insert(id, name.to_string());
        Ok(E::new(id, name.to_string()))
    }

    async fn update(&self, entity: &E) -> Result<E, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let slot = tables
            .named
            .get_mut(E::TABLE)
            .and_then(|rows| rows.get_mut(&entity.id()))
            .ok_or_else(|| AppError::not_found(E::LABEL, entity.id()))?;
        *slot = entity.name().to_string();
        Ok(entity.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        tables
            .named
            .get_mut(E::TABLE)
            .and_then(|rows| rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(E::LABEL, id))
    }
}

#[async_trait]
impl MenuRepository for MemoryRepository {
    async fn all(&self, name: Option<&str>) -> Result<Vec<Menu>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables
            .menus
            .values()
            .filter(|m| name_matches(&m.name, name))
            .cloned()
            .collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Menu>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables.menus.get(&id).cloned())
    }

    async fn create(&self, name: &str, category_id: i32) -> Result<Menu, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let menu = Menu {
            id: tables.next_id("menus"),
            name: name.to_string(),
            category_id,
            ..Menu::default()
        };
        tables.menus.insert(menu.id, menu.clone());
        Ok(menu)
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let stored = tables
            .menus
            .get_mut(&menu.id)
            .ok_or_else(|| AppError::not_found("menu", menu.id))?;
        stored.name = menu.name.clone();
        stored.category_id = menu.category_id;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        tables
            .menus
            .remove(&id)
            .ok_or_else(|| AppError::not_found("menu", id))?;
        tables.recipes.retain(|_, r| r.menu_id != id);
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for MemoryRepository {
    async fn find(&self, id: i32) -> Result<Option<MenuIngredient>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables.recipes.get(&id).cloned())
    }

    async fn for_menus(&self, menu_ids: &[i32]) -> Result<Vec<MenuIngredient>, AppError> {
        let tables = self.tables.read().map_err(poison_err)?;
        Ok(tables
            .recipes
            .values()
            .filter(|r| menu_ids.contains(&r.menu_id))
            .cloned()
            .collect())
    }

    async fn create(&self, menu_id: i32, ingredient_id: i32, qty: &str) -> Result<MenuIngredient, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let recipe = MenuIngredient {
            id: tables.next_id("recipes"),
            menu_id,
            ingredient_id,
            qty: qty.to_string(),
            ingredient: None,
        };
        tables.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, recipe: &MenuIngredient) -> Result<MenuIngredient, AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        let stored = tables
            .recipes
            .get_mut(&recipe.id)
            .ok_or_else(|| AppError::not_found("recipe", recipe.id))?;
        stored.menu_id = recipe.menu_id;
        stored.ingredient_id = recipe.ingredient_id;
        stored.qty = recipe.qty.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().map_err(poison_err)?;
        tables
            .recipes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("recipe", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Ingredient};

    #[tokio::test]
    async fn categories_and_ingredients_use_separate_sequences() {
        let repo = MemoryRepository::new();
        let c: Category = NamedRepository::<Category>::create(&repo, "Drinks").await.unwrap();
        let i: Ingredient = NamedRepository::<Ingredient>::create(&repo, "Sugar").await.unwrap();
        assert_eq!((c.id, i.id), (1, 1));
        let cats: Vec<Category> = NamedRepository::<Category>::all(&repo, None).await.unwrap();
        assert_eq!(cats, vec![Category { id: 1, name: "Drinks".into() }]);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::new();
        let first: Category = NamedRepository::<Category>::create(&repo, "a").await.unwrap();
        NamedRepository::<Category>::delete(&repo, first.id).await.unwrap();
        let second: Category = NamedRepository::<Category>::create(&repo, "b").await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn deleting_a_menu_drops_its_recipes() {
        let repo = MemoryRepository::new();
        let menu = MenuRepository::create(&repo, "Tea", 1).await.unwrap();
        RecipeRepository::create(&repo, menu.id, 1, "1 bag").await.unwrap();
        MenuRepository::delete(&repo, menu.id).await.unwrap();
        assert!(repo.for_menus(&[menu.id]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let repo = MemoryRepository::new();
        let err = RecipeRepository::delete(&repo, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "recipe", id: 42 }));
    }
}
