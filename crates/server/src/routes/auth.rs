use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::Value;
use tracing::warn;

use service::auth::{domain::IssuedToken, AuthError, TokenService};
use service::catalog::CatalogService;
use service::reviews::ReviewService;

use crate::errors::auth_rejection;
use crate::extract::ApiJson;

/// Shared handler state; every store handle is injected here at startup.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: CatalogService,
    pub reviews: ReviewService,
    pub tokens: Arc<TokenService>,
}

/// Issue an access token for whatever identity object the client sends.
#[utoipa::path(
    post, path = "/jwt", tag = "auth",
    request_body = crate::openapi::IdentityPayloadDoc,
    responses(
        (status = 200, description = "Token issued", body = crate::openapi::IssuedTokenDoc),
        (status = 400, description = "Invalid Payload")
    )
)]
pub async fn issue_token(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<Value>,
) -> Result<Json<IssuedToken>, Response> {
    let token = state.tokens.issue(payload).map_err(auth_rejection)?;
    Ok(Json(IssuedToken { token }))
}

/// Route-level middleware: `Authorization: Bearer <token>` must verify.
/// Absent header is 401; anything present but unusable is 403.
/// Verified claims are handed to handlers through request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let path = req.uri().path().to_string();

    let Some(header) = req.headers().get(AUTHORIZATION) else {
        warn!(%path, "missing Authorization header");
        return Err(auth_rejection(AuthError::MissingToken));
    };

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let Some(token) = token else {
        warn!(%path, "invalid Authorization format (expect Bearer)");
        return Err(auth_rejection(AuthError::InvalidToken("malformed header".into())));
    };

    match state.tokens.verify(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(%path, err = %e, "token validation failed");
            Err(auth_rejection(e))
        }
    }
}
