//! # Weekly Menu
//!
//! Day-keyed menu documents hold raw menu item ids, not copies of the items.
//! Reads expand every reference and silently drop the ones whose item has
//! since been deleted; writes verify the reference exists before appending.
//! Menu documents are provisioned by the `seed` binary, one per weekday, and
//! are never created here: mutating an unknown day is a not-found error.
//!
//! Add and remove are read-modify-write over a single document, so both run
//! under a per-day mutex. Without it, two concurrent appends to the same day
//! could read the same prior sequence and the later write would drop the
//! earlier append.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tracing::warn;

use crate::database::Collections;
use crate::error::AppError;
use crate::models::{Menu, MenuItem, ResolvedMenu};
use crate::utils::{is_well_formed_id, non_empty};

pub const MENU_NOT_FOUND: &str = "Menu not found for the provided day";
pub const ITEM_NOT_FOUND: &str = "menuItemId does not exist";

pub const WEEK_DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Per-day mutation locks, created lazily. Reads never take one.
#[derive(Default)]
pub struct MenuLocks {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MenuLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn for_day(&self, day: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(day.to_string()).or_default().clone()
    }
}

/// Expands each reference into its menu item, or `None` when the target no
/// longer exists.
pub async fn resolve<S: Collections>(
    store: &S,
    refs: &[String],
) -> Result<Vec<(String, Option<MenuItem>)>, AppError> {
    let mut resolved = Vec::with_capacity(refs.len());
    for reference in refs {
        let item = store.find_by_id::<MenuItem>(reference).await?;
        resolved.push((reference.clone(), item));
    }

    Ok(resolved)
}

/// Drops unresolved entries, keeping the order of the surviving items.
pub fn filter_resolved(resolved: Vec<(String, Option<MenuItem>)>) -> Vec<MenuItem> {
    resolved.into_iter().filter_map(|(_, item)| item).collect()
}

async fn expand<S: Collections>(store: &S, menu: Menu) -> Result<ResolvedMenu, AppError> {
    let stored = menu.items.len();
    let items = filter_resolved(resolve(store, &menu.items).await?);

    if items.len() < stored {
        warn!(
            "Menu for {} has {} dangling reference(s)",
            menu.day,
            stored - items.len()
        );
    }

    Ok(ResolvedMenu {
        day: menu.day,
        items,
    })
}

pub async fn menus_resolved<S: Collections>(store: &S) -> Result<Vec<ResolvedMenu>, AppError> {
    let menus = store.find_all::<Menu>().await?;

    let mut resolved = Vec::with_capacity(menus.len());
    for menu in menus {
        resolved.push(expand(store, menu).await?);
    }

    Ok(resolved)
}

pub async fn menu_for_day<S: Collections>(store: &S, day: &str) -> Result<ResolvedMenu, AppError> {
    let menu = store
        .find_one_by_field::<Menu>("day", day)
        .await?
        .ok_or_else(|| AppError::NotFound(MENU_NOT_FOUND.into()))?;

    expand(store, menu).await
}

/// Appends a menu item reference to the end of the day's menu.
///
/// The item must exist at add time; duplicates are allowed.
pub async fn add_item<S: Collections>(
    store: &S,
    locks: &MenuLocks,
    day: &str,
    menu_item_id: &str,
) -> Result<(), AppError> {
    if !non_empty(day) || !is_well_formed_id(menu_item_id) {
        return Err(AppError::BadRequest("Invalid day or menuItemId".into()));
    }

    if store.find_by_id::<MenuItem>(menu_item_id).await?.is_none() {
        return Err(AppError::NotFound(ITEM_NOT_FOUND.into()));
    }

    let lock = locks.for_day(day);
    let _guard = lock.lock().await;

    let mut menu = store
        .find_one_by_field::<Menu>("day", day)
        .await?
        .ok_or_else(|| AppError::NotFound(MENU_NOT_FOUND.into()))?;

    menu.items.push(menu_item_id.to_string());

    let id = menu.id.clone();
    store
        .replace_by_id(&id, menu)
        .await?
        .ok_or_else(|| AppError::NotFound(MENU_NOT_FOUND.into()))?;

    Ok(())
}

/// Removes every occurrence of the reference from the day's menu.
///
/// Removing a reference that is not present is a no-op success.
pub async fn remove_item<S: Collections>(
    store: &S,
    locks: &MenuLocks,
    day: &str,
    menu_item_id: &str,
) -> Result<(), AppError> {
    let lock = locks.for_day(day);
    let _guard = lock.lock().await;

    let mut menu = store
        .find_one_by_field::<Menu>("day", day)
        .await?
        .ok_or_else(|| AppError::NotFound(MENU_NOT_FOUND.into()))?;

    menu.items.retain(|reference| reference != menu_item_id);

    let id = menu.id.clone();
    store
        .replace_by_id(&id, menu)
        .await?
        .ok_or_else(|| AppError::NotFound(MENU_NOT_FOUND.into()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::items;
    use crate::models::{MenuItemPayload, PriceInput};

    fn payload(name: &str, price: &str) -> MenuItemPayload {
        MenuItemPayload {
            name: Some(name.into()),
            description: Some("A test dish".into()),
            price: Some(PriceInput::Text(price.into())),
            ingredients: Some("water, salt".into()),
            allergens: Some("none".into()),
        }
    }

    async fn store_with_day(day: &str) -> MemoryStore {
        let store = MemoryStore::default();
        store
            .insert(Menu {
                id: String::new(),
                day: day.into(),
                items: Vec::new(),
            })
            .await
            .unwrap();
        store
    }

    async fn stored_references(store: &MemoryStore, day: &str) -> Vec<String> {
        store
            .find_one_by_field::<Menu>("day", day)
            .await
            .unwrap()
            .unwrap()
            .items
    }

    #[tokio::test]
    async fn test_add_then_read_includes_item() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();
        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();

        add_item(&store, &locks, "Monday", &item.id).await.unwrap();

        let menu = menu_for_day(&store, "Monday").await.unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].name, "Soup");
        assert_eq!(menu.items[0].price, "3.50");
    }

    #[tokio::test]
    async fn test_dangling_references_are_filtered_not_repaired() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();
        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();
        let kept = items::create_item(&store, payload("Bread", "1.2")).await.unwrap();

        add_item(&store, &locks, "Monday", &item.id).await.unwrap();
        add_item(&store, &locks, "Monday", &kept.id).await.unwrap();
        add_item(&store, &locks, "Monday", &item.id).await.unwrap();

        items::delete_item(&store, &item.id).await.unwrap();

        // Every occurrence of the deleted id disappears from the read...
        let menu = menu_for_day(&store, "Monday").await.unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].name, "Bread");

        // ...but the stored reference sequence is untouched.
        assert_eq!(stored_references(&store, "Monday").await.len(), 3);
    }

    #[tokio::test]
    async fn test_remove_item_drops_all_occurrences_and_is_idempotent() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();
        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();

        add_item(&store, &locks, "Monday", &item.id).await.unwrap();
        add_item(&store, &locks, "Monday", &item.id).await.unwrap();

        remove_item(&store, &locks, "Monday", &item.id).await.unwrap();
        assert_eq!(stored_references(&store, "Monday").await.len(), 0);

        // Second removal of an absent reference is still a success.
        remove_item(&store, &locks, "Monday", &item.id).await.unwrap();
        assert_eq!(stored_references(&store, "Monday").await.len(), 0);
    }

    #[tokio::test]
    async fn test_add_unknown_item_leaves_menu_untouched() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();

        let missing = crate::database::next_id();
        let result = add_item(&store, &locks, "Monday", &missing).await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == ITEM_NOT_FOUND));
        assert!(stored_references(&store, "Monday").await.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_day_creates_no_menu() {
        let store = MemoryStore::default();
        let locks = MenuLocks::new();
        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();

        let result = add_item(&store, &locks, "Monday", &item.id).await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == MENU_NOT_FOUND));
        assert!(store.find_all::<Menu>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_day_is_not_found() {
        let store = MemoryStore::default();
        let locks = MenuLocks::new();

        let result = remove_item(&store, &locks, "Monday", &crate::database::next_id()).await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == MENU_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_malformed_item_id_is_bad_request() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();

        let result = add_item(&store, &locks, "Monday", "not-an-id").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(stored_references(&store, "Monday").await.is_empty());
    }

    #[tokio::test]
    async fn test_resolution_preserves_insertion_order() {
        let store = store_with_day("Friday").await;
        let locks = MenuLocks::new();

        for name in ["Starter", "Main", "Dessert"] {
            let item = items::create_item(&store, payload(name, "4.0")).await.unwrap();
            add_item(&store, &locks, "Friday", &item.id).await.unwrap();
        }

        let menu = menu_for_day(&store, "Friday").await.unwrap();
        let names: Vec<&str> = menu.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Starter", "Main", "Dessert"]);
    }

    #[tokio::test]
    async fn test_duplicate_references_both_resolve() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();
        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();

        add_item(&store, &locks, "Monday", &item.id).await.unwrap();
        add_item(&store, &locks, "Monday", &item.id).await.unwrap();

        let menu = menu_for_day(&store, "Monday").await.unwrap();
        assert_eq!(menu.items.len(), 2);
    }

    #[tokio::test]
    async fn test_soup_lifecycle() {
        let store = store_with_day("Monday").await;
        let locks = MenuLocks::new();

        let soup = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();
        assert_eq!(soup.price, "3.50");

        add_item(&store, &locks, "Monday", &soup.id).await.unwrap();
        let menu = menu_for_day(&store, "Monday").await.unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].name, "Soup");

        items::delete_item(&store, &soup.id).await.unwrap();
        let menu = menu_for_day(&store, "Monday").await.unwrap();
        assert!(menu.items.is_empty());
    }

    #[tokio::test]
    async fn test_read_all_expands_every_day() {
        let store = store_with_day("Monday").await;
        store
            .insert(Menu {
                id: String::new(),
                day: "Tuesday".into(),
                items: Vec::new(),
            })
            .await
            .unwrap();
        let locks = MenuLocks::new();

        let item = items::create_item(&store, payload("Soup", "3.5")).await.unwrap();
        add_item(&store, &locks, "Tuesday", &item.id).await.unwrap();

        let menus = menus_resolved(&store).await.unwrap();
        assert_eq!(menus.len(), 2);

        let tuesday = menus.iter().find(|menu| menu.day == "Tuesday").unwrap();
        assert_eq!(tuesday.items.len(), 1);

        let monday = menus.iter().find(|menu| menu.day == "Monday").unwrap();
        assert!(monday.items.is_empty());
    }
}
