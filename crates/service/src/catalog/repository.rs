use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::catalog::domain::{NewService, ServicePatch};
use crate::errors::ServiceError;
use models::service::Model;

/// Persistence for the `services` collection.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError>;
    async fn create(&self, input: &NewService) -> Result<Model, ServiceError>;
    /// Returns the number of matched rows.
    async fn update(&self, id: Uuid, patch: &ServicePatch) -> Result<u64, ServiceError>;
    /// Returns the number of deleted rows.
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list(&self, limit: Option<u64>) -> Result<Vec<Model>, ServiceError> {
        Ok(models::service::list(&self.db, limit).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
        use sea_orm::EntityTrait;
        Ok(models::service::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: &NewService) -> Result<Model, ServiceError> {
        Ok(models::service::create(&self.db, &input.title, &input.description, &input.image, input.price).await?)
    }

    async fn update(&self, id: Uuid, patch: &ServicePatch) -> Result<u64, ServiceError> {
        Ok(models::service::update_fields(
            &self.db,
            id,
            patch.title.as_deref(),
            patch.description.as_deref(),
            patch.image.as_deref(),
            patch.price,
        )
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(models::service::hard_delete(&self.db, id).await?)
    }
}

/// Simple in-memory repository for tests and local runs without Postgres
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryCatalogRepository {
        rows: Mutex<Vec<Model>>, // insertion order
        calls: AtomicUsize,
    }

    impl InMemoryCatalogRepository {
        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }
    }

    #[async_trait]
    impl CatalogRepository for InMemoryCatalogRepository {
        async fn list(&self, limit: Option<u64>) -> Result<Vec<Model>, ServiceError> {
            self.touch();
            let rows = self.rows.lock().unwrap();
            let take = limit.map(|n| n as usize).unwrap_or(rows.len());
            Ok(rows.iter().take(take).cloned().collect())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Model>, ServiceError> {
            self.touch();
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id == id).cloned())
        }

        async fn create(&self, input: &NewService) -> Result<Model, ServiceError> {
            self.touch();
            let model = Model {
                id: Uuid::new_v4(),
                title: input.title.clone(),
                description: input.description.clone(),
                image: input.image.clone(),
                price: input.price,
                created_at: Utc::now().into(),
            };
            self.rows.lock().unwrap().push(model.clone());
            Ok(model)
        }

        async fn update(&self, id: Uuid, patch: &ServicePatch) -> Result<u64, ServiceError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|r| r.id == id) else { return Ok(0) };
            if let Some(t) = &patch.title { row.title = t.clone(); }
            if let Some(d) = &patch.description { row.description = d.clone(); }
            if let Some(i) = &patch.image { row.image = i.clone(); }
            if let Some(p) = patch.price { row.price = p; }
            Ok(1)
        }

        async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok((before - rows.len()) as u64)
        }
    }
}
