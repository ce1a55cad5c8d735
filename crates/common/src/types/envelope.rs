//! JSON envelopes wrapping every API response.
//!
//! Success bodies carry `success: true` plus the payload under a fixed key;
//! failures carry `success: false` and a flat `error` message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::restaurant::{MenuItem, RestaurantSettings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemEnvelope {
    pub success: bool,
    #[serde(rename = "menuItem")]
    pub menu_item: Option<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub success: bool,
    pub settings: Option<RestaurantSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckEnvelope {
    pub success: bool,
}

impl AckEnvelope {
    pub fn ok() -> Self { Self { success: true } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEnvelope {
    pub success: bool,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeEnvelope {
    pub success: bool,
    pub username: String,
}
