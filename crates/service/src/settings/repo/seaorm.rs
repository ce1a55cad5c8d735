use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use common::types::RestaurantSettings;
use models::restaurant_settings;

use crate::errors::ServiceError;
use crate::settings::repository::SettingsRepository;

/// Postgres-backed singleton; uniqueness comes from the `slot` column.
pub struct SeaOrmSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn find_one(&self) -> Result<Option<RestaurantSettings>, ServiceError> {
        Ok(restaurant_settings::find_one(&self.db).await?)
    }

    async fn insert_if_absent(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
        Ok(restaurant_settings::insert_if_absent(&self.db, &doc).await?)
    }

    async fn save(&self, doc: RestaurantSettings) -> Result<RestaurantSettings, ServiceError> {
        Ok(restaurant_settings::save(&self.db, &doc).await?)
    }
}
