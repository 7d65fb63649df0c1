#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Database-backed tests are opt-in: they need `DATABASE_URL` and no `SKIP_DB_TESTS`.
pub fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

fn config_from_env() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::default();
    cfg.normalize_from_env(&|key: &str| std::env::var(key).ok());
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&config_from_env()).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Return a fresh connection for the current test's runtime
    connect_with_config(&config_from_env()).await
}

mod repository_tests {
    use super::*;
    use crate::catalog::domain::{NewService, ServicePatch};
    use crate::catalog::repository::{CatalogRepository, SeaOrmCatalogRepository};
    use crate::reviews::domain::{RatingDraft, RatingPatch};
    use crate::reviews::repository::{ReviewRepository, SeaOrmReviewRepository};
    use uuid::Uuid;

    #[tokio::test]
    async fn catalog_repository_round_trip() -> anyhow::Result<()> {
        if !db_tests_enabled() {
            return Ok(());
        }
        let repo = SeaOrmCatalogRepository { db: get_db().await? };
        let input = NewService {
            title: format!("repo_tour_{}", Uuid::new_v4()),
            description: "Harbour walk".into(),
            image: "https://img.example.com/h.jpg".into(),
            price: 40.0,
        };
        let created = repo.create(&input).await?;
        assert_eq!(repo.get(created.id).await?.map(|s| s.title), Some(input.title.clone()));

        let patch = ServicePatch { description: Some("Harbour walk at dusk".into()), ..Default::default() };
        assert_eq!(repo.update(created.id, &patch).await?, 1);
        assert_eq!(repo.update(Uuid::new_v4(), &patch).await?, 0);

        assert_eq!(repo.delete(created.id).await?, 1);
        assert!(repo.get(created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn review_repository_orders_newest_first() -> anyhow::Result<()> {
        if !db_tests_enabled() {
            return Ok(());
        }
        let repo = SeaOrmReviewRepository { db: get_db().await? };
        let service_id = Uuid::new_v4();
        let email = format!("{}@example.com", Uuid::new_v4().simple());
        let draft = |title: &str| RatingDraft {
            service_id,
            email: email.clone(),
            title: title.into(),
            comment: "ok".into(),
            rating: 3.0,
        };
        let first = repo.create(&draft("first")).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create(&draft("second")).await?;

        let listed: Vec<_> = repo.list_by_service(service_id).await?.into_iter().map(|r| r.id).collect();
        assert_eq!(listed, vec![second.id, first.id]);
        assert_eq!(repo.list_by_email(&email).await?.len(), 2);

        let patch = RatingPatch { comment: Some("better".into()), ..Default::default() };
        assert_eq!(repo.update(first.id, &patch).await?, 1);
        assert_eq!(repo.delete(first.id).await?, 1);
        assert_eq!(repo.delete(second.id).await?, 1);
        Ok(())
    }
}
