use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use common::types::MenuItem;

use crate::errors::ServiceError;
use crate::menu::patch::MenuItemPatch;
use crate::menu::repository::MenuRepository;
use crate::storage::json_map_store::JsonMapStore;

/// Menu collection kept in a single JSON file keyed by item id.
pub struct FileMenuRepository {
    store: Arc<JsonMapStore<Uuid, MenuItem>>,
}

impl FileMenuRepository {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::new(path).await? })
    }
}

#[async_trait]
impl MenuRepository for FileMenuRepository {
    async fn list_newest_first(&self) -> Result<Vec<MenuItem>, ServiceError> {
        let mut items = self.store.values().await;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn insert(&self, mut item: MenuItem) -> Result<MenuItem, ServiceError> {
        self.store
            .update_map(move |map| {
                // Creation times stay strictly increasing so listings never tie.
                if let Some(latest) = map.values().map(|i| i.created_at).max() {
                    if item.created_at <= latest {
                        item.created_at = latest + Duration::microseconds(1);
                    }
                }
                map.insert(item.id, item.clone());
                Ok(item)
            })
            .await
    }

    async fn update(&self, id: Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, ServiceError> {
        self.store
            .update_map(|map| {
                Ok(map.get_mut(&id).map(|item| {
                    patch.apply(item);
                    item.clone()
                }))
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn same_instant_creates_get_distinct_times() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("menu_file_repo_{}.json", Uuid::new_v4()));
        let repo = FileMenuRepository::open(&path).await?;
        let now = Utc::now();

        let first = repo.insert(MenuItem::blank(Uuid::new_v4(), now)).await?;
        let second = repo.insert(MenuItem::blank(Uuid::new_v4(), now)).await?;
        assert!(second.created_at > first.created_at);

        let listed = repo.list_newest_first().await?;
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_item() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("menu_file_repo_{}.json", Uuid::new_v4()));
        let repo = FileMenuRepository::open(&path).await?;
        let patch = MenuItemPatch { title: Some("x".into()), ..Default::default() };
        assert!(repo.update(Uuid::new_v4(), &patch).await?.is_none());
        assert!(!repo.delete(Uuid::new_v4()).await?);
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
