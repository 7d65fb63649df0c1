//! Create `services` table.
//! Listed offerings shown on the public catalogue.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(uuid(Services::Id).primary_key())
                    .col(string_len(Services::Title, 256).not_null())
                    .col(text(Services::Description).not_null())
                    .col(string_len(Services::Image, 1024).not_null())
                    .col(double(Services::Price).not_null())
                    .col(timestamp_with_time_zone(Services::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Services::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Services {
    Table,
    Id,
    Title,
    Description,
    Image,
    Price,
    CreatedAt,
}
