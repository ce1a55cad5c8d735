use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use common::types::MenuItem;
use models::menu_item;

use crate::errors::ServiceError;
use crate::menu::patch::MenuItemPatch;
use crate::menu::repository::MenuRepository;

/// Postgres-backed menu collection.
pub struct SeaOrmMenuRepository {
    db: DatabaseConnection,
}

impl SeaOrmMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn list_newest_first(&self) -> Result<Vec<MenuItem>, ServiceError> {
        Ok(menu_item::list_newest_first(&self.db).await?)
    }

    async fn insert(&self, item: MenuItem) -> Result<MenuItem, ServiceError> {
        Ok(menu_item::insert(&self.db, &item).await?)
    }

    async fn update(&self, id: Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, ServiceError> {
        // Read-modify-write; concurrent edits to the same item are last-write-wins.
        let Some(mut item) = menu_item::find(&self.db, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut item);
        Ok(menu_item::replace(&self.db, &item).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(menu_item::delete(&self.db, id).await?)
    }
}
