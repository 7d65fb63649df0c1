//! Create `ratings` table.
//! `service_id` deliberately has no foreign key: deleting a service leaves its ratings in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(uuid(Ratings::Id).primary_key())
                    .col(uuid(Ratings::ServiceId).not_null())
                    .col(string_len(Ratings::Email, 320).not_null())
                    .col(string_len(Ratings::Title, 256).not_null())
                    .col(text(Ratings::Comment).not_null())
                    .col(double(Ratings::Rating).not_null())
                    .col(timestamp_with_time_zone(Ratings::Created).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ratings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    ServiceId,
    Email,
    Title,
    Comment,
    Rating,
    Created,
}
