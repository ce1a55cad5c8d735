//! Create `menu_item` table.
//!
//! Known attributes get their own text columns; anything else a client sends
//! lands in the `extra` JSONB document.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuItem::Table)
                    .if_not_exists()
                    .col(uuid(MenuItem::Id).primary_key())
                    .col(text(MenuItem::Title).default(""))
                    .col(text(MenuItem::Description).default(""))
                    .col(text(MenuItem::Ingredients).default(""))
                    .col(text(MenuItem::Price).default(""))
                    .col(text(MenuItem::Currency).default(""))
                    .col(text_null(MenuItem::ImageData))
                    .col(json_binary(MenuItem::Extra).default(Expr::cust("'{}'::jsonb")))
                    .col(timestamp_with_time_zone(MenuItem::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MenuItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MenuItem {
    Table,
    Id,
    Title,
    Description,
    Ingredients,
    Price,
    Currency,
    ImageData,
    Extra,
    CreatedAt,
}
