//! PostgreSQL adapter. Table identifiers come from settings only; values are always bound.

use super::{MenuRepository, NamedRepository, RecipeRepository};
use crate::error::AppError;
use crate::model::{Menu, MenuIngredient, NamedEntity};
use async_trait::async_trait;
use sqlx::PgPool;

const MENU_COLUMNS: &str = "id, name, category_id";
const RECIPE_COLUMNS: &str = "id, menu_id, ingredient_id, qty";

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
    schema: String,
}

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `ILIKE` pattern matching `needle` anywhere; wildcards in the needle are literal.
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl PgRepository {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgRepository {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn table(&self, name: &str) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(name))
    }

    async fn delete_by_id(&self, table: &str, entity: &'static str, id: i32) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table(table));
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if done.rows_affected() == 0 {
            return Err(AppError::not_found(entity, id));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: NamedEntity> NamedRepository<E> for PgRepository {
    async fn all(&self, name: Option<&str>) -> Result<Vec<E>, AppError> {
        let table = self.table(E::TABLE);
        let rows = match name {
            Some(needle) => {
                let sql = format!("SELECT id, name FROM {} WHERE name ILIKE $1 ORDER BY id", table);
                tracing::debug!(sql = %sql, needle, "query");
                sqlx::query_as::<_, E>(&sql)
                    .bind(like_pattern(needle))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT id, name FROM {} ORDER BY id", table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<E>, AppError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", self.table(E::TABLE));
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_many(&self, ids: &[i32]) -> Result<Vec<E>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT id, name FROM {} WHERE id = ANY($1) ORDER BY id", self.table(E::TABLE));
        tracing::debug!(sql = %sql, ?ids, "query");
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, name: &str) -> Result<E, AppError> {
        let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id, name", self.table(E::TABLE));
        tracing::debug!(sql = %sql, name, "query");
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, entity: &E) -> Result<E, AppError> {
        let sql = format!("UPDATE {} SET name = $1 WHERE id = $2 RETURNING id, name", self.table(E::TABLE));
        tracing::debug!(sql = %sql, id = entity.id(), "query");
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(entity.name())
            .bind(entity.id())
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::not_found(E::LABEL, entity.id()))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.delete_by_id(E::TABLE, E::LABEL, id).await
    }
}

#[async_trait]
impl MenuRepository for PgRepository {
    async fn all(&self, name: Option<&str>) -> Result<Vec<Menu>, AppError> {
        let table = self.table("menus");
        let rows = match name {
            Some(needle) => {
                let sql = format!("SELECT {} FROM {} WHERE name ILIKE $1 ORDER BY id", MENU_COLUMNS, table);
                tracing::debug!(sql = %sql, needle, "query");
                sqlx::query_as::<_, Menu>(&sql)
                    .bind(like_pattern(needle))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {} FROM {} ORDER BY id", MENU_COLUMNS, table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, Menu>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Menu>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", MENU_COLUMNS, self.table("menus"));
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Menu>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, name: &str, category_id: i32) -> Result<Menu, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, category_id) VALUES ($1, $2) RETURNING {}",
            self.table("menus"),
            MENU_COLUMNS
        );
        tracing::debug!(sql = %sql, name, category_id, "query");
        let row = sqlx::query_as::<_, Menu>(&sql)
            .bind(name)
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, category_id = $2 WHERE id = $3 RETURNING {}",
            self.table("menus"),
            MENU_COLUMNS
        );
        tracing::debug!(sql = %sql, id = menu.id, "query");
        let row = sqlx::query_as::<_, Menu>(&sql)
            .bind(&menu.name)
            .bind(menu.category_id)
            .bind(menu.id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::not_found("menu", menu.id))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        // recipes.menu_id cascades
        self.delete_by_id("menus", "menu", id).await
    }
}

#[async_trait]
impl RecipeRepository for PgRepository {
    async fn find(&self, id: i32) -> Result<Option<MenuIngredient>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", RECIPE_COLUMNS, self.table("recipes"));
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, MenuIngredient>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn for_menus(&self, menu_ids: &[i32]) -> Result<Vec<MenuIngredient>, AppError> {
        if menu_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE menu_id = ANY($1) ORDER BY id",
            RECIPE_COLUMNS,
            self.table("recipes")
        );
        tracing::debug!(sql = %sql, ?menu_ids, "query");
        let rows = sqlx::query_as::<_, MenuIngredient>(&sql)
            .bind(menu_ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, menu_id: i32, ingredient_id: i32, qty: &str) -> Result<MenuIngredient, AppError> {
        let sql = format!(
            "INSERT INTO {} (menu_id, ingredient_id, qty) VALUES ($1, $2, $3) RETURNING {}",
            self.table("recipes"),
            RECIPE_COLUMNS
        );
        tracing::debug!(sql = %sql, menu_id, ingredient_id, "query");
        let row = sqlx::query_as::<_, MenuIngredient>(&sql)
            .bind(menu_id)
            .bind(ingredient_id)
            .bind(qty)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, recipe: &MenuIngredient) -> Result<MenuIngredient, AppError> {
        let sql = format!(
            "UPDATE {} SET menu_id = $1, ingredient_id = $2, qty = $3 WHERE id = $4 RETURNING {}",
            self.table("recipes"),
            RECIPE_COLUMNS
        );
        tracing::debug!(sql = %sql, id = recipe.id, "query");
        let row = sqlx::query_as::<_, MenuIngredient>(&sql)
            .bind(recipe.menu_id)
            .bind(recipe.ingredient_id)
            .bind(&recipe.qty)
            .bind(recipe.id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or_else(|| AppError::not_found("recipe", recipe.id))
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.delete_by_id("recipes", "recipe", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("category 1"), "%category 1%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn quoted_doubles_embedded_quotes() {
        assert_eq!(quoted("erp"), "\"erp\"");
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
