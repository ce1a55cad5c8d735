use serde_json::{json, Map, Value};
use uuid::Uuid;

use common::types::MenuItem;

use crate::errors::ConsoleError;

/// Currencies offered by the add form.
pub const CURRENCY_PRESETS: [&str; 4] = ["USD", "EUR", "GBP", "INR"];
pub const DEFAULT_CURRENCY: &str = "USD";

/// Fields editable through `set <field> <value>`.
pub const EDITABLE_FIELDS: [&str; 5] = ["title", "description", "ingredients", "price", "currency"];

/// Form state of the add/edit tab.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub price: String,
    pub currency: String,
    pub image_data: Option<String>,
}

impl Default for MenuDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            ingredients: String::new(),
            price: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            image_data: None,
        }
    }
}

impl MenuDraft {
    /// Pre-fill from an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            ingredients: item.ingredients.clone(),
            price: item.price.clone(),
            currency: if item.currency.is_empty() { DEFAULT_CURRENCY.to_string() } else { item.currency.clone() },
            image_data: item.image_data.clone(),
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ConsoleError> {
        let slot = match field {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "ingredients" => &mut self.ingredients,
            "price" => &mut self.price,
            "currency" => &mut self.currency,
            other => {
                return Err(ConsoleError::usage(format!(
                    "unknown field `{other}` (one of: {})",
                    EDITABLE_FIELDS.join(", ")
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.image_data = None;
    }

    /// Request body for create, or for update when `editing` names the target.
    ///
    /// An update without an image sends `imageData: null` so the stored image is cleared.
    pub fn to_body(&self, editing: Option<Uuid>) -> Value {
        let mut body = Map::new();
        if let Some(id) = editing {
            body.insert("_id".into(), json!(id));
        }
        body.insert("title".into(), json!(self.title));
        body.insert("description".into(), json!(self.description));
        body.insert("ingredients".into(), json!(self.ingredients));
        body.insert("price".into(), json!(self.price));
        body.insert("currency".into(), json!(self.currency));
        match (&self.image_data, editing) {
            (Some(image), _) => {
                body.insert("imageData".into(), json!(image));
            }
            (None, Some(_)) => {
                body.insert("imageData".into(), Value::Null);
            }
            (None, None) => {}
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn defaults_to_usd() {
        let d = MenuDraft::default();
        assert_eq!(d.currency, "USD");
        assert!(CURRENCY_PRESETS.contains(&d.currency.as_str()));
    }

    #[test]
    fn update_body_carries_identity() {
        let id = Uuid::new_v4();
        let mut item = MenuItem::blank(id, Utc::now());
        item.title = "Soup".into();
        let draft = MenuDraft::from_item(&item);
        let body = draft.to_body(Some(id));
        assert_eq!(body["_id"], json!(id.to_string()));
        assert_eq!(body["currency"], json!("USD"));
        assert!(draft.to_body(None).get("_id").is_none());
    }

    #[test]
    fn removed_image_is_cleared_on_update_and_omitted_on_create() {
        let id = Uuid::new_v4();
        let mut item = MenuItem::blank(id, Utc::now());
        item.image_data = Some("data:image/png;base64,AAAA".into());
        let mut draft = MenuDraft::from_item(&item);
        assert_eq!(draft.to_body(Some(id))["imageData"], json!("data:image/png;base64,AAAA"));

        draft.remove_image();
        assert_eq!(draft.to_body(Some(id)).get("imageData"), Some(&Value::Null));
        assert!(draft.to_body(None).get("imageData").is_none());
    }

    #[test]
    fn unknown_field_is_a_usage_error() {
        let mut d = MenuDraft::default();
        assert!(d.set_field("price", "4.50").is_ok());
        assert!(matches!(d.set_field("colour", "red"), Err(ConsoleError::Usage(_))));
    }
}
