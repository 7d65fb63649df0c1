use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::domain::TokenClaims;
use super::errors::AuthError;

/// Token service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::days(1) }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

/// Issues and verifies HS256 access tokens, independent of the web framework
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(cfg: AuthConfig) -> Result<Self, AuthError> {
        if cfg.jwt_secret.trim().is_empty() {
            return Err(AuthError::Config("empty signing secret".into()));
        }
        if cfg.token_ttl <= Duration::zero() {
            return Err(AuthError::Config("token ttl must be positive".into()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
            validation,
            ttl: cfg.token_ttl,
        })
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    /// Sign the caller's identity payload with a fixed expiry.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, TokenService};
    /// let svc = TokenService::new(AuthConfig::new("secret")).unwrap();
    /// let token = svc.issue(serde_json::json!({"email": "u@e.com"})).unwrap();
    /// let claims = svc.verify(&token).unwrap();
    /// assert_eq!(claims.email.as_deref(), Some("u@e.com"));
    /// ```
    pub fn issue(&self, payload: Value) -> Result<String, AuthError> {
        self.issue_at(payload, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issue time.
    #[instrument(skip(self, payload))]
    pub fn issue_at(&self, payload: Value, now: DateTime<Utc>) -> Result<String, AuthError> {
        let mut extra = match payload {
            Value::Object(map) => map,
            other => {
                return Err(AuthError::InvalidPayload(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };
        // Timing claims are always ours.
        extra.remove("iat");
        extra.remove("exp");
        let email = match extra.remove("email") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                return Err(AuthError::InvalidPayload(format!(
                    "email must be a string, got {}",
                    json_kind(&other)
                )))
            }
        };

        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenError("expiry out of range".into()))?;
        let claims = TokenClaims {
            email,
            iat: Some(now.timestamp()),
            exp: exp.timestamp(),
            extra,
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(email = ?claims.email, exp = claims.exp, "access_token_issued");
        Ok(token)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        match decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                debug!(err = %e, "token verification failed");
                Err(AuthError::InvalidToken(e.to_string()))
            }
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn svc() -> TokenService {
        TokenService::new(AuthConfig::new("unit-secret")).unwrap()
    }

    #[test]
    fn round_trip_keeps_email_and_extra_claims() {
        let s = svc();
        let token = s.issue(json!({"email": "a@x.com", "name": "Ayesha", "role": "admin"})).unwrap();
        let claims = s.verify(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
        assert_eq!(claims.extra["name"], "Ayesha");
        assert_eq!(claims.extra["role"], "admin");
        assert!(!claims.extra.contains_key("email"));
    }

    #[test]
    fn expiry_is_one_day_after_issue() {
        let s = svc();
        let now = Utc::now();
        let token = s.issue_at(json!({"email": "a@x.com"}), now).unwrap();
        let claims = s.verify(&token).unwrap();
        assert_eq!(claims.iat, Some(now.timestamp()));
        assert_eq!(claims.exp - now.timestamp(), 86_400);
    }

    #[test]
    fn caller_cannot_choose_expiry() {
        let s = svc();
        let now = Utc::now();
        let token = s.issue_at(json!({"email": "a@x.com", "exp": 4_102_444_800i64, "iat": 0}), now).unwrap();
        let claims = s.verify(&token).unwrap();
        assert_eq!(claims.exp, (now + Duration::days(1)).timestamp());
    }

    #[test]
    fn expired_token_is_rejected() {
        let s = svc();
        let issued = Utc::now() - Duration::days(2);
        let token = s.issue_at(json!({"email": "a@x.com"}), issued).unwrap();
        assert!(matches!(s.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new(AuthConfig::new("other-secret")).unwrap();
        let token = other.issue(json!({"email": "a@x.com"})).unwrap();
        assert!(svc().verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(svc().verify("not.a.jwt").is_err());
        assert!(svc().verify("").is_err());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = svc().issue(json!("a@x.com")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidPayload(_)));
        assert!(svc().issue(json!([1, 2])).is_err());
    }

    #[test]
    fn non_string_email_is_rejected() {
        assert!(matches!(svc().issue(json!({"email": 42})), Err(AuthError::InvalidPayload(_))));
    }

    #[test]
    fn payload_without_email_still_issues() {
        let s = svc();
        let token = s.issue(json!({"uid": "42"})).unwrap();
        let claims = s.verify(&token).unwrap();
        assert_eq!(claims.email, None);
    }

    #[test]
    fn expiry_overflow_is_an_error_not_a_panic() {
        let cfg = AuthConfig::new("unit-secret").with_ttl(Duration::seconds(10_000_000_000_000));
        let s = TokenService::new(cfg).unwrap();
        assert!(matches!(s.issue(json!({"email": "a@x.com"})), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn empty_secret_is_a_config_error() {
        assert!(matches!(TokenService::new(AuthConfig::new("  ")), Err(AuthError::Config(_))));
    }
}
