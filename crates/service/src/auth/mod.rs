//! Auth module: access-token issuing/verification and the ownership guard.
//!
//! Tokens are self-contained HS256 JWTs; nothing about them is persisted.

pub mod domain;
pub mod errors;
pub mod guard;
pub mod service;

pub use domain::TokenClaims;
pub use errors::AuthError;
pub use guard::ensure_owner;
pub use service::{AuthConfig, TokenService};
