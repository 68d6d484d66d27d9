//! Database bootstrap: create the database, schema and tables if they are missing.
//! Idempotent; there is no versioned migration history.

use crate::error::AppError;
use crate::repository::postgres::quoted;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the schema if not exists, then the four tables.
/// `menus.category_id` is checked by the services, not by a constraint;
/// recipe rows go away with their menu.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let schema = quoted(schema);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
        .execute(pool)
        .await?;

    let ddl = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}."categories" (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}."ingredients" (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}."menus" (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                category_id INTEGER NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {schema}."recipes" (
                id SERIAL PRIMARY KEY,
                menu_id INTEGER NOT NULL REFERENCES {schema}."menus" (id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL,
                qty TEXT NOT NULL
            )
            "#
        ),
        format!(r#"CREATE INDEX IF NOT EXISTS recipes_menu_id_idx ON {schema}."recipes" (menu_id)"#),
    ];
    for sql in &ddl {
        tracing::debug!(sql = %sql, "bootstrap");
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Storage(format!("invalid database url: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `url` into an admin url on the `postgres` database and the target database name.
/// Connection parameters after `?` stay on the admin url.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let path_start = base
        .rfind('/')
        .ok_or_else(|| AppError::Storage("database url: no path".into()))?
        + 1;
    let db_name = base[path_start..].trim().to_string();
    let mut admin_url = format!("{}postgres", &base[..path_start]);
    if let Some(query) = query {
        admin_url.push('?');
        admin_url.push_str(query);
    }
    Ok((admin_url, db_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_points_at_postgres_database() {
        let (admin, name) = parse_db_name_from_url("postgres://root:pw@localhost:5432/erp?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://root:pw@localhost:5432/postgres?sslmode=disable");
        assert_eq!(name, "erp");
    }

    #[test]
    fn connection_parameters_survive() {
        let (admin, name) =
            parse_db_name_from_url("postgres://u@db.internal/erp?sslmode=require&application_name=erp-api").unwrap();
        assert_eq!(admin, "postgres://u@db.internal/postgres?sslmode=require&application_name=erp-api");
        assert_eq!(name, "erp");

        let (admin, name) = parse_db_name_from_url("postgres://u@db.internal/erp").unwrap();
        assert_eq!(admin, "postgres://u@db.internal/postgres");
        assert_eq!(name, "erp");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("erp").is_err());
    }
}
