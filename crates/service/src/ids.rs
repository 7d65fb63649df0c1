//! Conversion of caller-supplied identifiers into store ids.

use uuid::Uuid;

use crate::errors::ServiceError;

/// Parse an opaque path/body identifier; malformed input never reaches the store.
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    let trimmed = raw.trim();
    Uuid::parse_str(trimmed).map_err(|_| ServiceError::InvalidId(format!("'{}' is not a valid identifier", trimmed)))
}
