use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::ids::parse_id;
use crate::results::{DeleteResult, InsertOneResult, UpdateResult};
use crate::reviews::domain::{NewRating, RatingPatch};
use crate::reviews::repository::ReviewRepository;
use models::rating::Model;

/// Application service for the ratings collection.
#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(repo: Arc<dyn ReviewRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewRating) -> Result<InsertOneResult, ServiceError> {
        let draft = input.into_draft()?;
        let created = self.repo.create(&draft).await?;
        info!(id = %created.id, service_id = %created.service_id, "rating_created");
        Ok(InsertOneResult::new(created.id))
    }

    /// Ratings for one service, newest first.
    pub async fn list_for_service(&self, raw_service_id: &str) -> Result<Vec<Model>, ServiceError> {
        let service_id = parse_id(raw_service_id)?;
        self.repo.list_by_service(service_id).await
    }

    /// Ratings written by `email`, newest first. Ownership is checked by the caller.
    pub async fn list_by_author(&self, email: &str) -> Result<Vec<Model>, ServiceError> {
        self.repo.list_by_email(email).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, raw_id: &str, patch: RatingPatch) -> Result<UpdateResult, ServiceError> {
        let id = parse_id(raw_id)?;
        patch.validate()?;
        let matched = self.repo.update(id, &patch).await?;
        info!(%id, matched, "rating_updated");
        Ok(UpdateResult::from_rows(matched))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<DeleteResult, ServiceError> {
        let id = parse_id(raw_id)?;
        let deleted = self.repo.delete(id).await?;
        info!(%id, deleted, "rating_deleted");
        Ok(DeleteResult::from_rows(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::repository::mock::InMemoryReviewRepository;
    use uuid::Uuid;

    fn rating(service_id: Uuid, email: &str, title: &str) -> NewRating {
        NewRating {
            service_id: service_id.to_string(),
            email: email.into(),
            title: title.into(),
            comment: "Lovely trip".into(),
            rating: 4.5,
        }
    }

    fn svc() -> (ReviewService, Arc<InMemoryReviewRepository>) {
        let repo = Arc::new(InMemoryReviewRepository::default());
        (ReviewService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_filtered() -> anyhow::Result<()> {
        let (svc, _) = svc();
        let tour = Uuid::new_v4();
        let other = Uuid::new_v4();
        svc.create(rating(tour, "a@x.com", "first")).await?;
        svc.create(rating(other, "a@x.com", "elsewhere")).await?;
        svc.create(rating(tour, "b@x.com", "second")).await?;

        let titles: Vec<_> = svc.list_for_service(&tour.to_string()).await?.into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["second", "first"]);

        let mine: Vec<_> = svc.list_by_author("a@x.com").await?.into_iter().map(|r| r.title).collect();
        assert_eq!(mine, vec!["elsewhere", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn created_is_stamped_by_server() -> anyhow::Result<()> {
        let (svc, repo) = svc();
        let before = chrono::Utc::now();
        svc.create(rating(Uuid::new_v4(), "a@x.com", "t")).await?;
        let stored = repo.snapshot();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].created.with_timezone(&chrono::Utc) >= before);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_ids_are_rejected_without_store_access() {
        let (svc, repo) = svc();
        assert!(matches!(svc.list_for_service("123").await, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.delete("nope").await, Err(ServiceError::InvalidId(_))));
        let mut bad = rating(Uuid::new_v4(), "a@x.com", "t");
        bad.service_id = "zzz".into();
        assert!(matches!(svc.create(bad).await, Err(ServiceError::InvalidId(_))));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn patch_updates_only_supplied_fields() -> anyhow::Result<()> {
        let (svc, _) = svc();
        let id = svc.create(rating(Uuid::new_v4(), "a@x.com", "old")).await?.inserted_id.to_string();
        let res = svc.update(&id, RatingPatch { rating: Some(2.0), ..Default::default() }).await?;
        assert_eq!((res.matched_count, res.modified_count), (1, 1));
        let row = &svc.list_by_author("a@x.com").await?[0];
        assert_eq!(row.rating, 2.0);
        assert_eq!(row.title, "old");
        Ok(())
    }

    #[tokio::test]
    async fn empty_patch_is_a_validation_error() {
        let (svc, _) = svc();
        let id = Uuid::new_v4().to_string();
        assert!(matches!(svc.update(&id, RatingPatch::default()).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_reports_count() -> anyhow::Result<()> {
        let (svc, _) = svc();
        let id = svc.create(rating(Uuid::new_v4(), "a@x.com", "t")).await?.inserted_id.to_string();
        assert_eq!(svc.delete(&id).await?.deleted_count, 1);
        assert_eq!(svc.delete(&id).await?.deleted_count, 0);
        Ok(())
    }
}
