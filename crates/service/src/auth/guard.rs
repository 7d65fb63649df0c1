use tracing::warn;

use super::domain::TokenClaims;
use super::errors::AuthError;

/// Allow the request only when the verified email claim equals the requested one.
///
/// A missing claim or a missing parameter never matches.
pub fn ensure_owner(claims: &TokenClaims, requested_email: Option<&str>) -> Result<(), AuthError> {
    match (claims.email.as_deref(), requested_email) {
        (Some(claimed), Some(requested)) if claimed == requested => Ok(()),
        (claimed, requested) => {
            warn!(claimed = ?claimed, requested = ?requested, "ownership check failed");
            Err(AuthError::OwnershipMismatch)
        }
    }
}
