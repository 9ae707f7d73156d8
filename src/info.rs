//! Settings singletons and opening hours.
//!
//! The `misc` collection holds one named document per setting; the seed
//! binary provisions them, this module only reads and overwrites.

use crate::database::Collections;
use crate::error::AppError;
use crate::models::{MiscDocument, OpeningHours, OpeningHoursPayload};
use crate::utils::{required_text, INVALID_ENTRY};

pub const FOOD_PANTRY: &str = "FoodPantry";
pub const TOKEN_KEY: &str = "TokenKey";

pub const MISC_NOT_FOUND: &str = "Sorry, this information could not be found";
pub const HOURS_NOT_FOUND: &str = "Opening hours not found for the provided day";

pub async fn misc_document<S: Collections>(
    store: &S,
    document_name: &str,
) -> Result<MiscDocument, AppError> {
    store
        .find_one_by_field("documentName", document_name)
        .await?
        .ok_or_else(|| AppError::NotFound(MISC_NOT_FOUND.into()))
}

/// Overwrites the singleton's `information` field with the replacement text.
pub async fn update_misc_document<S: Collections>(
    store: &S,
    document_name: &str,
    information: Option<String>,
) -> Result<(), AppError> {
    let information =
        required_text(information).ok_or_else(|| AppError::BadRequest(INVALID_ENTRY.into()))?;

    let mut document = misc_document(store, document_name).await?;
    document.information = information;

    let id = document.id.clone();
    store
        .replace_by_id(&id, document)
        .await?
        .ok_or_else(|| AppError::NotFound(MISC_NOT_FOUND.into()))?;

    Ok(())
}

pub async fn opening_hours<S: Collections>(store: &S) -> Result<Vec<OpeningHours>, AppError> {
    store.find_all().await
}

/// Updates both time fields through a single document replace, so a fault
/// can never leave one field updated and the other stale.
pub async fn update_opening_hours<S: Collections>(
    store: &S,
    payload: OpeningHoursPayload,
) -> Result<(), AppError> {
    let invalid = || AppError::BadRequest(INVALID_ENTRY.into());
    let day = required_text(payload.day).ok_or_else(invalid)?;
    let opening_time = required_text(payload.opening_time).ok_or_else(invalid)?;
    let closing_time = required_text(payload.closing_time).ok_or_else(invalid)?;

    let mut hours = store
        .find_one_by_field::<OpeningHours>("day", &day)
        .await?
        .ok_or_else(|| AppError::NotFound(HOURS_NOT_FOUND.into()))?;

    hours.opening_time = opening_time;
    hours.closing_time = closing_time;

    let id = hours.id.clone();
    store
        .replace_by_id(&id, hours)
        .await?
        .ok_or_else(|| AppError::NotFound(HOURS_NOT_FOUND.into()))?;

    Ok(())
}
