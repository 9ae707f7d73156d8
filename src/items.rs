//! Menu item and recipe operations.
//!
//! Menu items are the authoritative records the weekly menus reference.
//! Deleting one never touches the menus that reference it; the stale
//! references are dropped at read time instead.

use crate::database::Collections;
use crate::error::AppError;
use crate::models::{MenuItem, MenuItemPayload, Recipe, RecipePayload};
use crate::utils::{normalize_price, required_text, INVALID_ENTRY};

pub const ITEM_NOT_FOUND: &str = "Menu item not found";

fn invalid_entry() -> AppError {
    AppError::BadRequest(INVALID_ENTRY.into())
}

fn validate_item(payload: MenuItemPayload) -> Result<MenuItem, AppError> {
    let name = required_text(payload.name).ok_or_else(invalid_entry)?;
    let description = required_text(payload.description).ok_or_else(invalid_entry)?;
    let ingredients = required_text(payload.ingredients).ok_or_else(invalid_entry)?;
    let allergens = required_text(payload.allergens).ok_or_else(invalid_entry)?;

    let price = payload
        .price
        .as_ref()
        .and_then(normalize_price)
        .ok_or_else(invalid_entry)?;

    Ok(MenuItem {
        id: String::new(),
        name,
        description,
        price,
        ingredients,
        allergens,
    })
}

pub async fn list_items<S: Collections>(store: &S) -> Result<Vec<MenuItem>, AppError> {
    store.find_all().await
}

pub async fn get_item<S: Collections>(store: &S, id: &str) -> Result<MenuItem, AppError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
}

pub async fn create_item<S: Collections>(
    store: &S,
    payload: MenuItemPayload,
) -> Result<MenuItem, AppError> {
    let item = validate_item(payload)?;
    store.insert(item).await
}

/// Full-field replace under the existing id.
pub async fn update_item<S: Collections>(
    store: &S,
    id: &str,
    payload: MenuItemPayload,
) -> Result<MenuItem, AppError> {
    let item = validate_item(payload)?;
    store
        .replace_by_id(id, item)
        .await?
        .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.into()))
}

pub async fn delete_item<S: Collections>(store: &S, id: &str) -> Result<(), AppError> {
    if !store.delete_by_id::<MenuItem>(id).await? {
        return Err(AppError::NotFound(ITEM_NOT_FOUND.into()));
    }

    Ok(())
}

pub async fn list_recipes<S: Collections>(store: &S) -> Result<Vec<Recipe>, AppError> {
    store.find_all().await
}

/// Recipes are written once: they carry either an inline image reference or
/// the identifier of an uploaded document, never both.
pub async fn create_recipe<S: Collections>(
    store: &S,
    payload: RecipePayload,
) -> Result<Recipe, AppError> {
    let title = required_text(payload.title).ok_or_else(invalid_entry)?;
    let description = required_text(payload.description).ok_or_else(invalid_entry)?;
    let allergens = required_text(payload.allergens).ok_or_else(invalid_entry)?;

    let image = required_text(payload.image);
    let document_id = required_text(payload.document_id);
    if image.is_some() == document_id.is_some() {
        return Err(invalid_entry());
    }

    store
        .insert(Recipe {
            id: String::new(),
            title,
            description,
            allergens,
            image,
            document_id,
        })
        .await
}
