use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::types::RestaurantSettings;

use crate::errors::ModelError;

/// Value of the unique `slot` column shared by every singleton row.
pub const SINGLETON_SLOT: i16 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slot: i16,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_data: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RestaurantSettings {
    fn from(m: Model) -> Self {
        RestaurantSettings {
            id: m.id,
            name: m.name,
            logo_data: m.logo_data,
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<&RestaurantSettings> for ActiveModel {
    fn from(doc: &RestaurantSettings) -> Self {
        ActiveModel {
            id: Set(doc.id),
            slot: Set(SINGLETON_SLOT),
            name: Set(doc.name.clone()),
            logo_data: Set(doc.logo_data.clone()),
            updated_at: Set(doc.updated_at.into()),
        }
    }
}

pub async fn find_one(db: &DatabaseConnection) -> Result<Option<RestaurantSettings>, ModelError> {
    let row = Entity::find()
        .filter(Column::Slot.eq(SINGLETON_SLOT))
        .one(db)
        .await?;
    Ok(row.map(RestaurantSettings::from))
}

/// Insert `doc` unless a singleton already exists, then return the stored row.
pub async fn insert_if_absent(db: &DatabaseConnection, doc: &RestaurantSettings) -> Result<RestaurantSettings, ModelError> {
    let inserted = Entity::insert(ActiveModel::from(doc))
        .on_conflict(OnConflict::column(Column::Slot).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    tracing::debug!(inserted, "restaurant settings insert-if-absent");
    find_one(db)
        .await?
        .ok_or_else(|| ModelError::Db("restaurant settings row missing after insert".into()))
}

pub async fn save(db: &DatabaseConnection, doc: &RestaurantSettings) -> Result<RestaurantSettings, ModelError> {
    let updated = ActiveModel::from(doc).update(db).await?;
    Ok(updated.into())
}
