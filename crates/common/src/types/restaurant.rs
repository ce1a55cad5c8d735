//! Restaurant documents as they travel over the wire.
//!
//! Field names follow the JSON the admin console speaks: camelCase, with the
//! store-assigned identity under `_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single dish on the menu.
///
/// Unknown fields supplied by clients are kept in `extra` and written back
/// next to the known ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: String,
    /// Decimal as text, never parsed.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency: String,
    /// Inline data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuItem {
    /// Empty document with a fresh identity.
    pub fn blank(id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            ingredients: String::new(),
            price: String::new(),
            currency: String::new(),
            image_data: None,
            created_at,
            extra: Map::new(),
        }
    }
}

/// The restaurant-wide settings singleton.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_data: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantSettings {
    pub fn empty(id: Uuid, updated_at: DateTime<Utc>) -> Self {
        Self { id, name: String::new(), logo_data: None, updated_at }
    }
}
