use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // MenuItem: listing is always newest-first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_menu_item_created_at")
                    .table(MenuItem::Table)
                    .col((MenuItem::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_menu_item_created_at").table(MenuItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MenuItem { Table, CreatedAt }
