use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use common::types::MenuItem;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,
    #[sea_orm(column_type = "Text")]
    pub price: String,
    #[sea_orm(column_type = "Text")]
    pub currency: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_data: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub extra: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MenuItem {
    fn from(m: Model) -> Self {
        let extra = match m.extra {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        MenuItem {
            id: m.id,
            title: m.title,
            description: m.description,
            ingredients: m.ingredients,
            price: m.price,
            currency: m.currency,
            image_data: m.image_data,
            created_at: m.created_at.with_timezone(&Utc),
            extra,
        }
    }
}

impl From<&MenuItem> for ActiveModel {
    fn from(doc: &MenuItem) -> Self {
        ActiveModel {
            id: Set(doc.id),
            title: Set(doc.title.clone()),
            description: Set(doc.description.clone()),
            ingredients: Set(doc.ingredients.clone()),
            price: Set(doc.price.clone()),
            currency: Set(doc.currency.clone()),
            image_data: Set(doc.image_data.clone()),
            extra: Set(Value::Object(doc.extra.clone())),
            created_at: Set(doc.created_at.into()),
        }
    }
}

/// All items, newest first.
pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<MenuItem>, ModelError> {
    let rows = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(MenuItem::from).collect())
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<MenuItem>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?.map(MenuItem::from))
}

pub async fn insert(db: &DatabaseConnection, doc: &MenuItem) -> Result<MenuItem, ModelError> {
    let created = ActiveModel::from(doc).insert(db).await?;
    Ok(created.into())
}

/// Overwrite every column of an existing row; `None` when the row is gone.
pub async fn replace(db: &DatabaseConnection, doc: &MenuItem) -> Result<Option<MenuItem>, ModelError> {
    match ActiveModel::from(doc).update(db).await {
        Ok(updated) => Ok(Some(updated.into())),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
