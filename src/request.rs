//! Typed request shapes and their validation rules.
//!
//! Missing or `null` JSON fields deserialize to zero values so that an absent
//! field is reported as a validation failure rather than a binding failure.

use crate::error::AppError;
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    Min(i64),
}

/// One failing field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "{} is required", self.field),
            Rule::Min(min) => write!(f, "{} must be at least {}", self.field, min),
        }
    }
}

pub trait Validate {
    fn field_errors(&self) -> Vec<FieldError>;

    fn validate(&self) -> Result<(), AppError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            return Ok(());
        }
        Err(AppError::Validation(errors.iter().map(ToString::to_string).collect()))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn required_str(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(FieldError { field, rule: Rule::Required });
    }
}

/// `required` rejects the zero value; `min` is only checked once the value is present.
fn required_min(errors: &mut Vec<FieldError>, field: &'static str, value: i32, min: i64) {
    if value == 0 {
        errors.push(FieldError { field, rule: Rule::Required });
    } else if i64::from(value) < min {
        errors.push(FieldError { field, rule: Rule::Min(min) });
    }
}

fn required_id(errors: &mut Vec<FieldError>, field: &'static str, value: i32) {
    if value == 0 {
        errors.push(FieldError { field, rule: Rule::Required });
    }
}

/// `?name=` filter on list endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub name: Option<String>,
}

impl ListQuery {
    /// Empty filter means no filter.
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Path id of a single resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdParam(pub i32);

impl Validate for IdParam {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required_id(&mut errors, "id", self.0);
        errors
    }
}

/// Body of category and ingredient create/update.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

impl Validate for NameRequest {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required_str(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MenuRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category_id: i32,
}

impl Validate for MenuRequest {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required_str(&mut errors, "name", &self.name);
        required_min(&mut errors, "category_id", self.category_id, 1);
        errors
    }
}

/// Recipe body; the menu comes from the path.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeBody {
    #[serde(deserialize_with = "null_as_default")]
    pub ingredient_id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub qty: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RecipePath {
    pub menu_id: i32,
    pub id: i32,
}

/// Recipe create/update after merging path and body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeRequest {
    pub menu_id: i32,
    pub ingredient_id: i32,
    pub qty: String,
}

impl RecipeRequest {
    pub fn new(menu_id: i32, body: RecipeBody) -> Self {
        RecipeRequest {
            menu_id,
            ingredient_id: body.ingredient_id,
            qty: body.qty,
        }
    }
}

impl Validate for RecipeRequest {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required_min(&mut errors, "ingredient_id", self.ingredient_id, 1);
        required_min(&mut errors, "menu_id", self.menu_id, 1);
        required_str(&mut errors, "qty", &self.qty);
        errors
    }
}
