//! Persisted entities.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// Entity made of an id and a non-empty name (categories and ingredients).
pub trait NamedEntity:
    Clone + Send + Sync + Unpin + Serialize + for<'r> FromRow<'r, PgRow> + 'static
{
    /// Table holding the rows.
    const TABLE: &'static str;
    /// Singular label used in messages.
    const LABEL: &'static str;

    fn new(id: i32, name: String) -> Self;
    fn id(&self) -> i32;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl NamedEntity for Category {
    const TABLE: &'static str = "categories";
    const LABEL: &'static str = "category";

    fn new(id: i32, name: String) -> Self {
        Category { id, name }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
}

impl NamedEntity for Ingredient {
    const TABLE: &'static str = "ingredients";
    const LABEL: &'static str = "ingredient";

    fn new(id: i32, name: String) -> Self {
        Ingredient { id, name }
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A menu row. `category` and `ingredients` are filled only when eager-loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, FromRow)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    #[sqlx(skip)]
    pub category: Option<Category>,
    #[sqlx(skip)]
    pub ingredients: Vec<MenuIngredient>,
}

/// Recipe join row: a menu uses an ingredient in a free-text quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct MenuIngredient {
    pub id: i32,
    pub menu_id: i32,
    pub ingredient_id: i32,
    pub qty: String,
    #[sqlx(skip)]
    pub ingredient: Option<Ingredient>,
}
