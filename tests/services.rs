use erp_api::dto::{NamedResponse, RecipeLine};
use erp_api::request::{MenuRequest, NameRequest, RecipeBody, RecipeRequest};
use erp_api::{AppError, AppState};

fn name(n: &str) -> NameRequest {
    NameRequest { name: n.to_string() }
}

fn recipe(menu_id: i32, ingredient_id: i32, qty: &str) -> RecipeRequest {
    RecipeRequest::new(
        menu_id,
        RecipeBody {
            ingredient_id,
            qty: qty.to_string(),
        },
    )
}

#[tokio::test]
async fn category_round_trip() {
    let state = AppState::in_memory();
    let created = state.categories.create(&name("X")).await.unwrap();
    assert_eq!(state.categories.get(created.id).await.unwrap().name, "X");

    state.categories.update(created.id, &name("Y")).await.unwrap();
    assert_eq!(state.categories.get(created.id).await.unwrap().name, "Y");

    state.categories.delete(created.id).await.unwrap();
    let err = state.categories.get(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "category", .. }));
}

#[tokio::test]
async fn name_filter_matches_partial_case_insensitive() {
    let state = AppState::in_memory();
    for i in 1..=10 {
        state.categories.create(&name(&format!("category {i}"))).await.unwrap();
    }
    let names: Vec<String> = state
        .categories
        .list(Some("CATEGORY 1"))
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["category 1", "category 10"]);
}

#[tokio::test]
async fn empty_tables_list_as_empty() {
    let state = AppState::in_memory();
    assert!(state.categories.list(None).await.unwrap().is_empty());
    assert!(state.ingredients.list(None).await.unwrap().is_empty());
    assert!(state.menus.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_missing_rows_is_not_found() {
    let state = AppState::in_memory();
    assert!(matches!(state.categories.delete(9).await, Err(AppError::NotFound { .. })));
    assert!(matches!(state.ingredients.delete(9).await, Err(AppError::NotFound { .. })));
    assert!(matches!(state.menus.delete(9).await, Err(AppError::NotFound { .. })));
    assert!(matches!(state.recipes.delete(9).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn menu_create_requires_existing_category() {
    let state = AppState::in_memory();
    let req = MenuRequest {
        name: "Latte".into(),
        category_id: 3,
    };
    let err = state.menus.create(&req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "category", id: 3 }));
    assert!(state.menus.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn menu_create_embeds_category() {
    let state = AppState::in_memory();
    let drinks = state.categories.create(&name("Drinks")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Latte".into(),
            category_id: drinks.id,
        })
        .await
        .unwrap();
    assert_eq!(menu.category_id, drinks.id);
    assert_eq!(menu.category, Some(drinks));
    assert!(menu.ingredients.is_empty());
}

#[tokio::test]
async fn menu_update_resolves_new_category() {
    let state = AppState::in_memory();
    let drinks = state.categories.create(&name("Drinks")).await.unwrap();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Toast".into(),
            category_id: drinks.id,
        })
        .await
        .unwrap();

    let missing = MenuRequest {
        name: "Toast".into(),
        category_id: 77,
    };
    assert!(matches!(
        state.menus.update(menu.id, &missing).await,
        Err(AppError::NotFound { entity: "category", id: 77 })
    ));

    let moved = state
        .menus
        .update(
            menu.id,
            &MenuRequest {
                name: "French toast".into(),
                category_id: food.id,
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.name, "French toast");
    assert_eq!(moved.category, Some(food));
}

#[tokio::test]
async fn menu_list_composes_category_and_lines_in_creation_order() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let rice = state.ingredients.create(&name("Rice")).await.unwrap();
    let egg = state.ingredients.create(&name("Egg")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Fried rice".into(),
            category_id: food.id,
        })
        .await
        .unwrap();
    state.recipes.create(&recipe(menu.id, egg.id, "2 pcs")).await.unwrap();
    state.recipes.create(&recipe(menu.id, rice.id, "200 gr")).await.unwrap();

    let menus = state.menus.list(None).await.unwrap();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].category, Some(NamedResponse { id: food.id, name: "Food".into() }));
    assert_eq!(
        menus[0].ingredients,
        vec![
            RecipeLine { id: egg.id, name: "Egg".into(), qty: "2 pcs".into() },
            RecipeLine { id: rice.id, name: "Rice".into(), qty: "200 gr".into() },
        ]
    );

    let detail = state.menus.get(menu.id).await.unwrap();
    assert_eq!(detail, menus[0]);
}

#[tokio::test]
async fn recipe_create_writes_nothing_when_a_reference_is_missing() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let salt = state.ingredients.create(&name("Salt")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Soup".into(),
            category_id: food.id,
        })
        .await
        .unwrap();

    let err = state.recipes.create(&recipe(menu.id + 1, salt.id, "1 tsp")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "menu", .. }));

    let err = state.recipes.create(&recipe(menu.id, salt.id + 1, "1 tsp")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "ingredient", .. }));

    assert!(state.menus.get(menu.id).await.unwrap().ingredients.is_empty());
}

#[tokio::test]
async fn recipe_create_returns_row_with_ingredient() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let salt = state.ingredients.create(&name("Salt")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Soup".into(),
            category_id: food.id,
        })
        .await
        .unwrap();

    let row = state.recipes.create(&recipe(menu.id, salt.id, "1 tsp")).await.unwrap();
    assert_eq!(row.menu_id, menu.id);
    assert_eq!(row.ingredient_id, salt.id);
    assert_eq!(row.qty, "1 tsp");
    assert_eq!(row.ingredient.map(|i| i.name), Some("Salt".to_string()));
}

#[tokio::test]
async fn recipe_update_overwrites_all_fields() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let salt = state.ingredients.create(&name("Salt")).await.unwrap();
    let pepper = state.ingredients.create(&name("Pepper")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Soup".into(),
            category_id: food.id,
        })
        .await
        .unwrap();
    let row = state.recipes.create(&recipe(menu.id, salt.id, "1 tsp")).await.unwrap();

    assert!(matches!(
        state.recipes.update(row.id + 5, &recipe(menu.id, pepper.id, "1 pinch")).await,
        Err(AppError::NotFound { entity: "recipe", .. })
    ));

    let updated = state
        .recipes
        .update(row.id, &recipe(menu.id, pepper.id, "1 pinch"))
        .await
        .unwrap();
    assert_eq!(updated.id, row.id);
    assert_eq!(updated.ingredient_id, pepper.id);
    assert_eq!(updated.qty, "1 pinch");

    let lines = state.menus.get(menu.id).await.unwrap().ingredients;
    assert_eq!(lines, vec![RecipeLine { id: pepper.id, name: "Pepper".into(), qty: "1 pinch".into() }]);
}

#[tokio::test]
async fn deleting_a_menu_removes_its_recipes() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let salt = state.ingredients.create(&name("Salt")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Soup".into(),
            category_id: food.id,
        })
        .await
        .unwrap();
    let row = state.recipes.create(&recipe(menu.id, salt.id, "1 tsp")).await.unwrap();

    state.menus.delete(menu.id).await.unwrap();
    assert!(matches!(state.recipes.delete(row.id).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn recipe_update_requires_existing_ingredient_and_menu() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();
    let salt = state.ingredients.create(&name("Salt")).await.unwrap();
    let menu = state
        .menus
        .create(&MenuRequest {
            name: "Soup".into(),
            category_id: food.id,
        })
        .await
        .unwrap();
    let row = state.recipes.create(&recipe(menu.id, salt.id, "1 tsp")).await.unwrap();

    let err = state.recipes.update(row.id, &recipe(menu.id, 99, "2 tsp")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "ingredient", id: 99 }));

    let err = state.recipes.update(row.id, &recipe(77, salt.id, "2 tsp")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "menu", id: 77 }));

    let lines = state.menus.get(menu.id).await.unwrap().ingredients;
    assert_eq!(lines, vec![RecipeLine { id: salt.id, name: "Salt".into(), qty: "1 tsp".into() }]);
}

#[tokio::test]
async fn missing_menu_cannot_be_read_or_updated() {
    let state = AppState::in_memory();
    let food = state.categories.create(&name("Food")).await.unwrap();

    let err = state.menus.get(55).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "menu", id: 55 }));

    let req = MenuRequest {
        name: "Latte".into(),
        category_id: food.id,
    };
    let err = state.menus.update(55, &req).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { entity: "menu", id: 55 }));
    assert!(state.menus.list(None).await.unwrap().is_empty());
}
