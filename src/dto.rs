//! Response DTOs assembled by the services.

use crate::model::{Menu, NamedEntity};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedResponse {
    pub id: i32,
    pub name: String,
}

pub type CategoryResponse = NamedResponse;
pub type IngredientResponse = NamedResponse;

impl NamedResponse {
    pub fn from_entity<E: NamedEntity>(entity: &E) -> Self {
        NamedResponse {
            id: entity.id(),
            name: entity.name().to_string(),
        }
    }
}

/// One ingredient line of a menu: ingredient id, ingredient name, recipe quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecipeLine {
    pub id: i32,
    pub name: String,
    pub qty: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuResponse {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    /// `null` when the referenced category no longer exists.
    pub category: Option<CategoryResponse>,
    pub ingredients: Vec<RecipeLine>,
}

impl From<&Menu> for MenuResponse {
    fn from(menu: &Menu) -> Self {
        MenuResponse {
            id: menu.id,
            name: menu.name.clone(),
            category_id: menu.category_id,
            category: menu.category.as_ref().map(NamedResponse::from_entity),
            ingredients: menu
                .ingredients
                .iter()
                .map(|recipe| RecipeLine {
                    id: recipe.ingredient_id,
                    name: recipe
                        .ingredient
                        .as_ref()
                        .map(|i| i.name.clone())
                        .unwrap_or_default(),
                    qty: recipe.qty.clone(),
                })
                .collect(),
        }
    }
}
