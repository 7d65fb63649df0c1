use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::reviews::domain::{RatingDraft, RatingPatch};
use models::rating::Model;

/// Persistence for the `ratings` collection. Listings are newest first.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, draft: &RatingDraft) -> Result<Model, ServiceError>;
    async fn list_by_service(&self, service_id: Uuid) -> Result<Vec<Model>, ServiceError>;
    async fn list_by_email(&self, email: &str) -> Result<Vec<Model>, ServiceError>;
    /// Returns the number of matched rows.
    async fn update(&self, id: Uuid, patch: &RatingPatch) -> Result<u64, ServiceError>;
    /// Returns the number of deleted rows.
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmReviewRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(&self, draft: &RatingDraft) -> Result<Model, ServiceError> {
        Ok(models::rating::create(&self.db, draft.service_id, &draft.email, &draft.title, &draft.comment, draft.rating).await?)
    }

    async fn list_by_service(&self, service_id: Uuid) -> Result<Vec<Model>, ServiceError> {
        Ok(models::rating::list_by_service(&self.db, service_id).await?)
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Model>, ServiceError> {
        Ok(models::rating::list_by_email(&self.db, email).await?)
    }

    async fn update(&self, id: Uuid, patch: &RatingPatch) -> Result<u64, ServiceError> {
        Ok(models::rating::update_fields(&self.db, id, patch.title.as_deref(), patch.comment.as_deref(), patch.rating).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(models::rating::hard_delete(&self.db, id).await?)
    }
}

/// Simple in-memory repository for tests and local runs without Postgres
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryReviewRepository {
        rows: Mutex<Vec<Model>>, // insertion order
        calls: AtomicUsize,
    }

    impl InMemoryReviewRepository {
        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        /// Stored rows as-is, for assertions.
        pub fn snapshot(&self) -> Vec<Model> { self.rows.lock().unwrap().clone() }

        fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }

        fn newest_first<F>(&self, keep: F) -> Vec<Model>
        where
            F: Fn(&Model) -> bool,
        {
            let rows = self.rows.lock().unwrap();
            // Later inserts win ties on equal timestamps.
            let mut out: Vec<Model> = rows.iter().rev().filter(|r| keep(r)).cloned().collect();
            out.sort_by(|a, b| b.created.cmp(&a.created));
            out
        }
    }

    #[async_trait]
    impl ReviewRepository for InMemoryReviewRepository {
        async fn create(&self, draft: &RatingDraft) -> Result<Model, ServiceError> {
            self.touch();
            let model = Model {
                id: Uuid::new_v4(),
                service_id: draft.service_id,
                email: draft.email.clone(),
                title: draft.title.clone(),
                comment: draft.comment.clone(),
                rating: draft.rating,
                created: Utc::now().into(),
            };
            self.rows.lock().unwrap().push(model.clone());
            Ok(model)
        }

        async fn list_by_service(&self, service_id: Uuid) -> Result<Vec<Model>, ServiceError> {
            self.touch();
            Ok(self.newest_first(|r| r.service_id == service_id))
        }

        async fn list_by_email(&self, email: &str) -> Result<Vec<Model>, ServiceError> {
            self.touch();
            Ok(self.newest_first(|r| r.email == email))
        }

        async fn update(&self, id: Uuid, patch: &RatingPatch) -> Result<u64, ServiceError> {
            self.touch();
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|r| r.id == id) else { return Ok(0) };
            if let Some(t) = &patch.title { row.title = t.clone(); }
            if let Some(c) = &patch.comment { row.comment = c.clone(); }
            if let Some(r) = patch.rating { row.rating = r; }
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
