use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use common::types::RestaurantSettings;

use super::input::SettingsInput;
use super::repository::SettingsRepository;
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

fn now() -> chrono::DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl SettingsService {
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self { Self { repo } }

    /// The singleton record, created empty on first access.
    ///
    /// # Examples
    /// ```
    /// use service::settings::{SettingsService, repository::mock::MockSettingsRepository};
    /// use std::sync::Arc;
    /// let svc = SettingsService::new(Arc::new(MockSettingsRepository::default()));
    /// let first = tokio_test::block_on(svc.get_or_create()).unwrap();
    /// let second = tokio_test::block_on(svc.get_or_create()).unwrap();
    /// assert_eq!(first.id, second.id);
    /// assert_eq!(first.name, "");
    /// ```
    pub async fn get_or_create(&self) -> Result<RestaurantSettings, ServiceError> {
        if let Some(existing) = self.repo.find_one().await? {
            return Ok(existing);
        }
        let created = self.repo.insert_if_absent(RestaurantSettings::empty(Uuid::new_v4(), now())).await?;
        info!(settings_id = %created.id, "settings_created");
        Ok(created)
    }

    /// Create the record from `body`, or overwrite the supplied fields of the existing one.
    #[instrument(skip(self, body))]
    pub async fn upsert(&self, body: Value) -> Result<RestaurantSettings, ServiceError> {
        let input = SettingsInput::from_document(body)?;

        let current = match self.repo.find_one().await? {
            Some(existing) => existing,
            None => {
                let mut fresh = RestaurantSettings::empty(Uuid::new_v4(), now());
                input.apply(&mut fresh);
                let stored = self.repo.insert_if_absent(fresh.clone()).await?;
                if stored.id == fresh.id {
                    info!(settings_id = %stored.id, "settings_created");
                    return Ok(stored);
                }
                debug!(settings_id = %stored.id, "settings created concurrently, updating instead");
                stored
            }
        };

        let mut next = current;
        input.apply(&mut next);
        next.updated_at = now();
        let saved = self.repo.save(next).await?;
        info!(settings_id = %saved.id, "settings_updated");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::repository::mock::MockSettingsRepository;
    use serde_json::json;

    #[tokio::test]
    async fn first_upsert_creates_from_payload() -> Result<(), anyhow::Error> {
        let svc = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        let s = svc.upsert(json!({ "name": "Trattoria", "logoData": "data:image/png;base64,AA==" })).await?;
        assert_eq!(s.name, "Trattoria");
        assert_eq!(s.logo_data.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(svc.get_or_create().await?.id, s.id);
        Ok(())
    }

    #[tokio::test]
    async fn upsert_updates_every_supplied_field() -> Result<(), anyhow::Error> {
        let svc = SettingsService::new(Arc::new(MockSettingsRepository::default()));
        let created = svc.get_or_create().await?;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let renamed = svc.upsert(json!({ "name": "Bistro" })).await?;
        assert_eq!(renamed.id, created.id);
        assert_eq!(renamed.name, "Bistro");
        assert!(renamed.updated_at > created.updated_at);

        let with_logo = svc.upsert(json!({ "logoData": "data:image/png;base64,AA==" })).await?;
        assert_eq!(with_logo.name, "Bistro");
        assert!(with_logo.logo_data.is_some());

        let cleared = svc.upsert(json!({ "logoData": null })).await?;
        assert_eq!(cleared.name, "Bistro");
        assert_eq!(cleared.logo_data, None);
        Ok(())
    }

    #[tokio::test]
    async fn losing_the_create_race_still_applies_input() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockSettingsRepository::default());
        let winner = RestaurantSettings::empty(Uuid::new_v4(), now());
        *repo.racing_insert.lock().unwrap() = Some(winner.clone());

        let svc = SettingsService::new(repo);
        let s = svc.upsert(json!({ "name": "Late" })).await?;
        assert_eq!(s.id, winner.id);
        assert_eq!(s.name, "Late");
        Ok(())
    }
}
