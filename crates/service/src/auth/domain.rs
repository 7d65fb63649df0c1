use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded access-token claims attached to a verified request.
///
/// `email` is the only claim the server interprets; everything else the
/// caller put in the identity payload is carried through in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response body of the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}
