use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use common::types::MenuItem;

use super::patch::MenuItemPatch;
use super::repository::MenuRepository;
use crate::errors::ServiceError;
use crate::text::{coerce_text, into_object};

/// Menu business service independent of web framework
#[derive(Clone)]
pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self { Self { repo } }

    /// All menu items, newest first.
    pub async fn list(&self) -> Result<Vec<MenuItem>, ServiceError> {
        self.repo.list_newest_first().await
    }

    /// Create an item from an arbitrary JSON object.
    ///
    /// # Examples
    /// ```
    /// use service::menu::{MenuService, repository::mock::MockMenuRepository};
    /// use std::sync::Arc;
    /// let svc = MenuService::new(Arc::new(MockMenuRepository::default()));
    /// let body = serde_json::json!({ "title": "Soup", "price": "5", "currency": "USD" });
    /// let item = tokio_test::block_on(svc.create(body)).unwrap();
    /// assert_eq!(item.title, "Soup");
    /// ```
    #[instrument(skip(self, body))]
    pub async fn create(&self, body: Value) -> Result<MenuItem, ServiceError> {
        let patch = MenuItemPatch::from_object(into_object(body)?)?;
        // Postgres keeps microseconds; truncate so both backends return the same instant.
        let mut item = MenuItem::blank(Uuid::new_v4(), Utc::now().trunc_subsecs(6));
        patch.apply(&mut item);
        let stored = self.repo.insert(item).await?;
        info!(item_id = %stored.id, title = %stored.title, "menu_item_created");
        Ok(stored)
    }

    /// Update the item named by the body's `_id` with the other supplied fields.
    #[instrument(skip(self, body))]
    pub async fn update(&self, body: Value) -> Result<MenuItem, ServiceError> {
        let mut doc = into_object(body)?;
        let raw_id = match doc.remove("_id") {
            None | Some(Value::Null) => return Err(ServiceError::MissingId),
            Some(v) => coerce_text("_id", v)?,
        };
        if raw_id.trim().is_empty() {
            return Err(ServiceError::MissingId);
        }
        // An id that cannot name a stored item is reported like any other miss.
        let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
            warn!(id = %raw_id, "menu update with malformed id");
            return Err(ServiceError::not_found("Menu item"));
        };
        let patch = MenuItemPatch::from_object(doc)?;
        let updated = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item"))?;
        info!(item_id = %updated.id, "menu_item_updated");
        Ok(updated)
    }

    /// Delete by id; unknown or malformed ids are a successful no-op.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Option<&str>) -> Result<(), ServiceError> {
        let raw = id.map(str::trim).filter(|s| !s.is_empty()).ok_or(ServiceError::MissingId)?;
        match Uuid::parse_str(raw) {
            Ok(id) => {
                let removed = self.repo.delete(id).await?;
                info!(item_id = %id, removed, "menu_item_deleted");
            }
            Err(_) => warn!(id = %raw, "menu delete with malformed id ignored"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::repository::mock::MockMenuRepository;
    use serde_json::json;

    fn svc() -> MenuService {
        MenuService::new(Arc::new(MockMenuRepository::default()))
    }

    #[tokio::test]
    async fn create_then_list_newest_first() -> Result<(), anyhow::Error> {
        let svc = svc();
        let mut ids = Vec::new();
        for n in 0..5 {
            let item = svc.create(json!({ "title": format!("Dish {n}") })).await?;
            ids.push(item.id);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        let listed: Vec<Uuid> = svc.list().await?.into_iter().map(|i| i.id).collect();
        ids.reverse();
        assert_eq!(listed, ids);
        Ok(())
    }

    #[tokio::test]
    async fn create_ignores_client_identity_and_keeps_extras() -> Result<(), anyhow::Error> {
        let svc = svc();
        let forged = Uuid::new_v4();
        let item = svc
            .create(json!({ "_id": forged.to_string(), "title": "Soup", "price": 5, "chef": "Ana" }))
            .await?;
        assert_ne!(item.id, forged);
        assert_eq!(item.price, "5");
        assert_eq!(item.extra.get("chef"), Some(&json!("Ana")));
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() -> Result<(), anyhow::Error> {
        let svc = svc();
        let created = svc.create(json!({ "title": "Soup", "price": "5", "currency": "USD" })).await?;
        let updated = svc
            .update(json!({ "_id": created.id.to_string(), "title": "Soup Deluxe" }))
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Soup Deluxe");
        assert_eq!(updated.price, "5");
        assert_eq!(updated.created_at, created.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() {
        let svc = svc();
        assert!(matches!(svc.update(json!({ "title": "x" })).await, Err(ServiceError::MissingId)));
        assert!(matches!(svc.update(json!({ "_id": "", "title": "x" })).await, Err(ServiceError::MissingId)));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = svc();
        let err = svc.update(json!({ "_id": Uuid::new_v4().to_string() })).await.unwrap_err();
        assert_eq!(err.to_string(), "Menu item not found");
        let err = svc.update(json!({ "_id": "abc" })).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_semantics() -> Result<(), anyhow::Error> {
        let svc = svc();
        let item = svc.create(json!({ "title": "Soup" })).await?;

        assert!(matches!(svc.delete(None).await, Err(ServiceError::MissingId)));
        assert!(matches!(svc.delete(Some("")).await, Err(ServiceError::MissingId)));
        assert_eq!(svc.list().await?.len(), 1);

        svc.delete(Some("not-a-uuid")).await?;
        svc.delete(Some(&Uuid::new_v4().to_string())).await?;
        assert_eq!(svc.list().await?.len(), 1);

        svc.delete(Some(&item.id.to_string())).await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn store_failure_surfaces() {
        let svc = MenuService::new(Arc::new(MockMenuRepository::failing("connection refused")));
        let err = svc.list().await.unwrap_err();
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("connection refused"));
    }
}
