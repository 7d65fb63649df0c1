//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Owns access-token issuing, verification and the ownership guard.

pub mod errors;
pub mod ids;
pub mod results;
pub mod pagination;
pub mod auth;
pub mod catalog;
pub mod reviews;
#[cfg(test)]
pub mod test_support;
