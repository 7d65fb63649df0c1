//! Write acknowledgements returned by insert/update/delete routes.
//!
//! Field names follow the document-store driver results the web client
//! already consumes (`insertedId`, `matchedCount`, `deletedCount`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self { Self { acknowledged: true, inserted_id } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    /// Postgres reports matched rows, so both counters carry the same value.
    pub fn from_rows(rows_affected: u64) -> Self {
        Self { acknowledged: true, matched_count: rows_affected, modified_count: rows_affected }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn from_rows(rows_affected: u64) -> Self { Self { acknowledged: true, deleted_count: rows_affected } }
}
