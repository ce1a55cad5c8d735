use serde_json::{Map, Value};

use common::types::MenuItem;

use crate::errors::ServiceError;
use crate::text::{coerce_optional_text, coerce_text};

/// Fields supplied by a create or update request.
///
/// `None` means "not supplied". For the image, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image_data: Option<Option<String>>,
    pub extra: Map<String, Value>,
}

impl MenuItemPatch {
    /// Split a request object into known fields and free-form extras.
    ///
    /// `_id` and `createdAt` are owned by the store and dropped here.
    pub fn from_object(doc: Map<String, Value>) -> Result<Self, ServiceError> {
        let mut patch = Self::default();
        for (key, value) in doc {
            match key.as_str() {
                "_id" | "createdAt" => {}
                "title" => patch.title = Some(coerce_text(&key, value)?),
                "description" => patch.description = Some(coerce_text(&key, value)?),
                "ingredients" => patch.ingredients = Some(coerce_text(&key, value)?),
                "price" => patch.price = Some(coerce_text(&key, value)?),
                "currency" => patch.currency = Some(coerce_text(&key, value)?),
                "imageData" => patch.image_data = Some(coerce_optional_text(&key, value)?),
                _ => {
                    patch.extra.insert(key, value);
                }
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the supplied fields of `item`.
    pub fn apply(&self, item: &mut MenuItem) {
        if let Some(v) = &self.title {
            item.title = v.clone();
        }
        if let Some(v) = &self.description {
            item.description = v.clone();
        }
        if let Some(v) = &self.ingredients {
            item.ingredients = v.clone();
        }
        if let Some(v) = &self.price {
            item.price = v.clone();
        }
        if let Some(v) = &self.currency {
            item.currency = v.clone();
        }
        if let Some(v) = &self.image_data {
            item.image_data = v.clone();
        }
        for (k, v) in &self.extra {
            item.extra.insert(k.clone(), v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn identity_fields_are_ignored() {
        let patch = MenuItemPatch::from_object(object(json!({
            "_id": "not-mine",
            "createdAt": "1999-01-01T00:00:00Z",
            "title": "Soup",
            "price": 5,
            "spicy": true
        })))
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Soup"));
        assert_eq!(patch.price.as_deref(), Some("5"));
        assert!(!patch.extra.contains_key("_id"));
        assert!(!patch.extra.contains_key("createdAt"));
        assert_eq!(patch.extra.get("spicy"), Some(&json!(true)));
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut item = MenuItem::blank(Uuid::new_v4(), Utc::now());
        item.title = "Soup".into();
        item.price = "5".into();
        item.image_data = Some("data:image/png;base64,AA==".into());

        let patch = MenuItemPatch::from_object(object(json!({ "title": "Soup Deluxe", "imageData": null }))).unwrap();
        patch.apply(&mut item);

        assert_eq!(item.title, "Soup Deluxe");
        assert_eq!(item.price, "5");
        assert_eq!(item.image_data, None);
    }

    #[test]
    fn container_in_text_field_is_rejected() {
        let res = MenuItemPatch::from_object(object(json!({ "title": { "en": "Soup" } })));
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }
}
