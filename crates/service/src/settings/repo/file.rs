use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use common::types::RestaurantSettings;

use crate::errors::ServiceError;
use crate::settings::repository::SettingsRepository;
use crate::storage::json_map_store::JsonMapStore;

const SINGLETON_KEY: &str = "restaurant";

/// Settings singleton stored under one key of a JSON file.
pub struct FileSettingsRepository {
    store: Arc<JsonMapStore<String, RestaurantSettings>>,
}

impl FileSettingsRepository {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::new(path).await? })
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn find_one(&self) -> Result<Option<RestaurantSettings>, ServiceError> {
        Ok(self.store.get(&SINGLETON_KEY.to_string()).await)
    }

    async fn insert_if_absent(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
        self.store
            .update_map(|map| Ok(map.entry(SINGLETON_KEY.to_string()).or_insert(doc).clone()))
            .await
    }

    async fn save(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
        self.store.insert(SINGLETON_KEY.to_string(), doc.clone()).await?;
        Ok(doc)
    }
}
