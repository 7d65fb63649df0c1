use std::sync::Arc;
use tracing::{info, instrument};

use crate::catalog::domain::{NewService, ServicePatch};
use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;
use crate::ids::parse_id;
use crate::pagination::ListLimit;
use crate::results::{DeleteResult, InsertOneResult, UpdateResult};
use models::service::Model;

/// Application service for the services collection.
/// Ids arrive as raw strings and are parsed here, before the repository is touched.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    pub async fn list(&self, limit: ListLimit) -> Result<Vec<Model>, ServiceError> {
        self.repo.list(limit.get()).await
    }

    /// Fetch one service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::catalog::{CatalogService, repository::mock::InMemoryCatalogRepository};
    /// let svc = CatalogService::new(Arc::new(InMemoryCatalogRepository::default()));
    /// let err = tokio_test::block_on(svc.get("not-an-id")).unwrap_err();
    /// assert!(matches!(err, service::errors::ServiceError::InvalidId(_)));
    /// ```
    pub async fn get(&self, raw_id: &str) -> Result<Model, ServiceError> {
        let id = parse_id(raw_id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("service"))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: NewService) -> Result<InsertOneResult, ServiceError> {
        input.validate()?;
        let created = self.repo.create(&input).await?;
        info!(id = %created.id, "service_created");
        Ok(InsertOneResult::new(created.id))
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, raw_id: &str, patch: ServicePatch) -> Result<UpdateResult, ServiceError> {
        let id = parse_id(raw_id)?;
        patch.validate()?;
        let matched = self.repo.update(id, &patch).await?;
        info!(%id, matched, "service_updated");
        Ok(UpdateResult::from_rows(matched))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<DeleteResult, ServiceError> {
        let id = parse_id(raw_id)?;
        let deleted = self.repo.delete(id).await?;
        info!(%id, deleted, "service_deleted");
        Ok(DeleteResult::from_rows(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::InMemoryCatalogRepository;
    use uuid::Uuid;

    fn new_service(title: &str) -> NewService {
        NewService {
            title: title.into(),
            description: "Guided tour".into(),
            image: "https://img.example.com/tour.jpg".into(),
            price: 150.0,
        }
    }

    fn svc() -> (CatalogService, Arc<InMemoryCatalogRepository>) {
        let repo = Arc::new(InMemoryCatalogRepository::default());
        (CatalogService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn limit_caps_listing() -> anyhow::Result<()> {
        let (svc, _) = svc();
        for i in 0..5 {
            svc.create(new_service(&format!("tour {i}"))).await?;
        }
        assert_eq!(svc.list(ListLimit::parse(Some("2"))).await?.len(), 2);
        assert_eq!(svc.list(ListLimit::none()).await?.len(), 5);
        let titles: Vec<_> = svc.list(ListLimit::from(3)).await?.into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["tour 0", "tour 1", "tour 2"]);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_never_reaches_repository() {
        let (svc, repo) = svc();
        assert!(matches!(svc.get("xyz").await, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.delete("xyz").await, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.update("xyz", ServicePatch { price: Some(1.0), ..Default::default() }).await, Err(ServiceError::InvalidId(_))));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_on_get_but_zero_on_delete() -> anyhow::Result<()> {
        let (svc, _) = svc();
        let id = Uuid::new_v4().to_string();
        assert!(matches!(svc.get(&id).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.delete(&id).await?.deleted_count, 0);
        let res = svc.update(&id, ServicePatch { title: Some("x".into()), ..Default::default() }).await?;
        assert_eq!(res.matched_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() -> anyhow::Result<()> {
        let (svc, _) = svc();
        let created = svc.create(new_service("river cruise")).await?;
        let id = created.inserted_id.to_string();
        let res = svc.update(&id, ServicePatch { price: Some(99.0), ..Default::default() }).await?;
        assert_eq!(res.matched_count, 1);
        let after = svc.get(&id).await?;
        assert_eq!(after.price, 99.0);
        assert_eq!(after.title, "river cruise");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_document_is_rejected_before_insert() {
        let (svc, repo) = svc();
        let mut bad = new_service("x");
        bad.price = -5.0;
        assert!(matches!(svc.create(bad).await, Err(ServiceError::Validation(_))));
        assert_eq!(repo.calls(), 0);
    }
}
