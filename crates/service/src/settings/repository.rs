use async_trait::async_trait;

use common::types::RestaurantSettings;

use crate::errors::ServiceError;

/// Persistence for the settings singleton.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find_one(&self) -> Result<Option<RestaurantSettings>, ServiceError>;
    /// Atomically store `doc` unless a record exists; returns the stored record.
    async fn insert_if_absent(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError>;
    /// Overwrite the existing record.
    async fn save(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSettingsRepository {
        record: Mutex<Option<RestaurantSettings>>,
        /// Record that appears between `find_one` and `insert_if_absent`, as if written by another request.
        pub racing_insert: Mutex<Option<RestaurantSettings>>,
    }

    #[async_trait]
    impl SettingsRepository for MockSettingsRepository {
        async fn find_one(&self) -> Result<Option<RestaurantSettings>, ServiceError> {
            Ok(self.record.lock().unwrap().clone())
        }

        async fn insert_if_absent(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
            let mut record = self.record.lock().unwrap();
            if record.is_none() {
                if let Some(winner) = self.racing_insert.lock().unwrap().take() {
                    *record = Some(winner);
                }
            }
            Ok(record.get_or_insert(doc).clone())
        }

        async fn save(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
            *self.record.lock().unwrap() = Some(doc.clone());
            Ok(doc)
        }
    }
}
