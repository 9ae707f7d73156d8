use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::auth::require_valid_credential;
use crate::error::{AppError, Message};
use crate::info::{self, FOOD_PANTRY};
use crate::items;
use crate::menus;
use crate::models::{
    AddItemPayload, InformationPayload, MenuItem, MenuItemPayload, MiscDocument, OpeningHours,
    OpeningHoursPayload, Recipe, RecipePayload, ResolvedMenu,
};
use crate::state::AppState;
use crate::utils::INVALID_ENTRY;

pub async fn home_handler() -> &'static str {
    "Home Page"
}

pub async fn menu_items_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(items::list_items(&state.store).await?))
}

pub async fn menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>, AppError> {
    Ok(Json(items::get_item(&state.store, &id).await?))
}

pub async fn create_menu_item_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<MenuItemPayload>,
) -> Result<Json<MenuItem>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    Ok(Json(items::create_item(&state.store, payload).await?))
}

pub async fn update_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<MenuItemPayload>,
) -> Result<Json<MenuItem>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    Ok(Json(items::update_item(&state.store, &id, payload).await?))
}

pub async fn delete_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Message>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    items::delete_item(&state.store, &id).await?;
    Ok(Json(Message::new("Menu item deleted")))
}

pub async fn recipes_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(items::list_recipes(&state.store).await?))
}

pub async fn create_recipe_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<Recipe>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    Ok(Json(items::create_recipe(&state.store, payload).await?))
}

pub async fn weekly_menu_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResolvedMenu>>, AppError> {
    Ok(Json(menus::menus_resolved(&state.store).await?))
}

pub async fn weekly_menu_day_handler(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
) -> Result<Json<ResolvedMenu>, AppError> {
    Ok(Json(menus::menu_for_day(&state.store, &day).await?))
}

pub async fn add_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path(day): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<AddItemPayload>,
) -> Result<Json<Message>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    let menu_item_id = payload
        .menu_item_id
        .ok_or_else(|| AppError::BadRequest(INVALID_ENTRY.into()))?;

    menus::add_item(&state.store, &state.menu_locks, &day, &menu_item_id).await?;
    Ok(Json(Message::new("Menu item added to the menu")))
}

pub async fn remove_menu_item_handler(
    State(state): State<Arc<AppState>>,
    Path((day, menu_item_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Message>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    menus::remove_item(&state.store, &state.menu_locks, &day, &menu_item_id).await?;
    Ok(Json(Message::new("Menu item removed from the menu")))
}

pub async fn food_pantry_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MiscDocument>, AppError> {
    Ok(Json(info::misc_document(&state.store, FOOD_PANTRY).await?))
}

pub async fn update_food_pantry_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<InformationPayload>,
) -> Result<Json<Message>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    info::update_misc_document(&state.store, FOOD_PANTRY, payload.information).await?;
    Ok(Json(Message::new("Food pantry information updated")))
}

pub async fn opening_hours_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OpeningHours>>, AppError> {
    Ok(Json(info::opening_hours(&state.store).await?))
}

pub async fn update_opening_hours_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<OpeningHoursPayload>,
) -> Result<Json<Message>, AppError> {
    require_valid_credential(&state.store, &headers).await?;

    info::update_opening_hours(&state.store, payload).await?;
    Ok(Json(Message::new("Opening hours updated")))
}
