//! ERP API: REST backend for restaurant categories, ingredients, menus and recipes.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod request;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StorageBackend};
pub use error::{AppError, ConfigError};
pub use repository::{MemoryRepository, PgRepository};
pub use response::{respond, ApiResponse};
pub use routes::{api_routes, app, common_routes_with_ready};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
