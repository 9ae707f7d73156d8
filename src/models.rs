use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A persisted record tied to its collection name.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Non-negative decimal, normalized to exactly two fractional digits.
    pub price: String,
    pub ingredients: String,
    pub allergens: String,
}

impl Document for MenuItem {
    const COLLECTION: &'static str = "menuItems";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub allergens: String,
    /// Inline image reference, for recipes without an uploaded document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Identifier assigned by the file store at upload time; equals the
    /// stored file's base name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl Document for Recipe {
    const COLLECTION: &'static str = "recipes";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Day-keyed menu document. `items` holds raw menu item ids in insertion
/// order, not copies of the items themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub id: String,
    pub day: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Document for Menu {
    const COLLECTION: &'static str = "menus";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Named single-value settings record (`FoodPantry`, `TokenKey`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiscDocument {
    #[serde(default)]
    pub id: String,
    pub document_name: String,
    pub information: String,
}

impl Document for MiscDocument {
    const COLLECTION: &'static str = "misc";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub id: String,
    pub day: String,
    pub opening_time: String,
    pub closing_time: String,
}

impl Document for OpeningHours {
    const COLLECTION: &'static str = "openingHours";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Read model for menu responses: references expanded into their items,
/// dangling ones already dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMenu {
    pub day: String,
    pub items: Vec<MenuItem>,
}

/// Price as it arrives on the wire, either a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub allergens: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub document_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
    #[serde(default)]
    pub menu_item_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationPayload {
    #[serde(default)]
    pub information: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursPayload {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
}
