//! Create `restaurant_settings` table.
//!
//! The unique `slot` column pins the table to a single logical row so that
//! concurrent get-or-create calls cannot insert two singletons.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RestaurantSettings::Table)
                    .if_not_exists()
                    .col(uuid(RestaurantSettings::Id).primary_key())
                    .col(small_integer(RestaurantSettings::Slot).default(1).unique_key())
                    .col(text(RestaurantSettings::Name).default(""))
                    .col(text_null(RestaurantSettings::LogoData))
                    .col(timestamp_with_time_zone(RestaurantSettings::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RestaurantSettings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RestaurantSettings { Table, Id, Slot, Name, LogoData, UpdatedAt }
