use async_trait::async_trait;
use uuid::Uuid;

use common::types::MenuItem;

use super::patch::MenuItemPatch;
use crate::errors::ServiceError;

/// Persistence for the menu collection.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Every item, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<MenuItem>, ServiceError>;
    /// Store a new document and return it as stored.
    async fn insert(&self, item: MenuItem) -> Result<MenuItem, ServiceError>;
    /// Apply `patch` to the item; `None` when no such item exists.
    async fn update(&self, id: Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, ServiceError>;
    /// Returns whether an item was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockMenuRepository {
        items: Mutex<Vec<MenuItem>>,
        /// When set, every call fails with this storage error.
        pub fail_with: Option<String>,
    }

    impl MockMenuRepository {
        pub fn failing(msg: &str) -> Self {
            Self { items: Mutex::default(), fail_with: Some(msg.to_string()) }
        }

        fn check(&self) -> Result<(), ServiceError> {
            match &self.fail_with {
                Some(msg) => Err(ServiceError::Storage(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl MenuRepository for MockMenuRepository {
        async fn list_newest_first(&self) -> Result<Vec<MenuItem>, ServiceError> {
            self.check()?;
            let mut items = self.items.lock().unwrap().clone();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(items)
        }

        async fn insert(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
            self.check()?;
            self.items.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn update(&self, id: Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, ServiceError> {
            self.check()?;
            let mut items = self.items.lock().unwrap();
            Ok(items.iter_mut().find(|i| i.id == id).map(|item| {
                patch.apply(item);
                item.clone()
            }))
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            self.check()?;
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|i| i.id != id);
            Ok(items.len() != before)
        }
    }
}
