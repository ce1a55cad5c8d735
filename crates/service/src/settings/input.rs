use serde_json::Value;

use common::types::RestaurantSettings;

use crate::errors::ServiceError;
use crate::text::{coerce_optional_text, coerce_text, into_object};

/// Fields accepted by the settings upsert. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsInput {
    pub name: Option<String>,
    /// `Some(None)` clears the logo.
    pub logo_data: Option<Option<String>>,
}

impl SettingsInput {
    pub fn from_document(body: Value) -> Result<Self, ServiceError> {
        let mut doc = into_object(body)?;
        let name = doc.remove("name").map(|v| coerce_text("name", v)).transpose()?;
        let logo_data = doc
            .remove("logoData")
            .map(|v| coerce_optional_text("logoData", v))
            .transpose()?;
        Ok(Self { name, logo_data })
    }

    pub fn apply(&self, settings: &mut RestaurantSettings) {
        if let Some(name) = &self.name {
            settings.name = name.clone();
        }
        if let Some(logo) = &self.logo_data {
            settings.logo_data = logo.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_logo_is_an_explicit_clear() {
        let input = SettingsInput::from_document(json!({ "logoData": null, "theme": "dark" })).unwrap();
        assert_eq!(input.name, None);
        assert_eq!(input.logo_data, Some(None));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(SettingsInput::from_document(json!([1, 2])).is_err());
    }
}
