use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Services: natural listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_services_created_at")
                    .table(Services::Table)
                    .col(Services::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Ratings: per-service feed, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ratings_service_created")
                    .table(Ratings::Table)
                    .col(Ratings::ServiceId)
                    .col(Ratings::Created)
                    .to_owned(),
            )
            .await?;

        // Ratings: per-author listing, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ratings_email_created")
                    .table(Ratings::Table)
                    .col(Ratings::Email)
                    .col(Ratings::Created)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_ratings_email_created").table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ratings_service_created").table(Ratings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_services_created_at").table(Services::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Services { Table, CreatedAt }

#[derive(DeriveIden)]
enum Ratings { Table, ServiceId, Email, Created }
