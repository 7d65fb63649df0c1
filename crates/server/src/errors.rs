use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::MessageBody;
use service::auth::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// `{"error": <title>, "message": <detail>}` response.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.error, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            ServiceError::InvalidId(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Id", Some(msg)),
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Db(msg) => {
                error!(error = %msg, "store operation failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        // 400 malformed JSON, 415 wrong content type, 422 wrong shape
        JsonApiError::new(rejection.status(), "Invalid Body", Some(rejection.body_text()))
    }
}

/// Rejection produced by the token layer and the ownership guard.
///
/// Authorization failures answer with a bare `{"message": ...}` body which the
/// web client matches on; everything else goes through [`JsonApiError`].
pub fn auth_rejection(e: AuthError) -> Response {
    match e {
        AuthError::MissingToken => {
            (StatusCode::UNAUTHORIZED, Json(MessageBody::new("unauthorized access"))).into_response()
        }
        AuthError::InvalidToken(_) => {
            (StatusCode::FORBIDDEN, Json(MessageBody::new("Forbidden access"))).into_response()
        }
        AuthError::OwnershipMismatch => {
            (StatusCode::FORBIDDEN, Json(MessageBody::new("unauthorized access"))).into_response()
        }
        AuthError::InvalidPayload(msg) => {
            warn!(error = %msg, "token request rejected");
            JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Payload", Some(msg)).into_response()
        }
        AuthError::TokenError(msg) | AuthError::Config(msg) => {
            error!(error = %msg, "token signing failed");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None).into_response()
        }
    }
}

/// Error type returned by resource handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Service(e) => JsonApiError::from(e).into_response(),
            AppError::Auth(e) => auth_rejection(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failure_hides_detail() {
        let err = JsonApiError::from(ServiceError::Db("connection refused".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.is_none());
    }

    #[test]
    fn auth_statuses() {
        assert_eq!(auth_rejection(AuthError::MissingToken).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(auth_rejection(AuthError::InvalidToken("bad".into())).status(), StatusCode::FORBIDDEN);
        assert_eq!(auth_rejection(AuthError::OwnershipMismatch).status(), StatusCode::FORBIDDEN);
        assert_eq!(auth_rejection(AuthError::InvalidPayload("x".into())).status(), StatusCode::BAD_REQUEST);
    }
}
