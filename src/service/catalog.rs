//! Single-entity CRUD for categories and ingredients.

use crate::dto::NamedResponse;
use crate::error::AppError;
use crate::model::{Category, Ingredient, NamedEntity};
use crate::repository::NamedRepository;
use crate::request::NameRequest;
use std::sync::Arc;

pub struct CatalogService<E: NamedEntity> {
    repo: Arc<dyn NamedRepository<E>>,
}

pub type CategoryService = CatalogService<Category>;
pub type IngredientService = CatalogService<Ingredient>;

impl<E: NamedEntity> Clone for CatalogService<E> {
    fn clone(&self) -> Self {
        CatalogService {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: NamedEntity> CatalogService<E> {
    pub fn new(repo: Arc<dyn NamedRepository<E>>) -> Self {
        CatalogService { repo }
    }

    /// Empty result is not an error.
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<NamedResponse>, AppError> {
        let rows = self.repo.all(name).await?;
        Ok(rows.iter().map(NamedResponse::from_entity).collect())
    }

    pub async fn get(&self, id: i32) -> Result<NamedResponse, AppError> {
        let entity = self.find(id).await?;
        Ok(NamedResponse::from_entity(&entity))
    }

    /// Duplicate names are allowed.
    pub async fn create(&self, req: &NameRequest) -> Result<NamedResponse, AppError> {
        let entity = self.repo.create(&req.name).await?;
        tracing::info!(entity = E::LABEL, id = entity.id(), "created");
        Ok(NamedResponse::from_entity(&entity))
    }

    pub async fn update(&self, id: i32, req: &NameRequest) -> Result<NamedResponse, AppError> {
        let mut entity = self.find(id).await?;
        entity.set_name(req.name.clone());
        let saved = self.repo.update(&entity).await?;
        Ok(NamedResponse::from_entity(&saved))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let entity = self.find(id).await?;
        self.repo.delete(entity.id()).await
    }

    async fn find(&self, id: i32) -> Result<E, AppError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(E::LABEL, id))
    }
}
