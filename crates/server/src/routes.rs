pub mod auth;
pub mod reviews;
pub mod services;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn banner() -> &'static str {
    "TripGuide server is running"
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public reads plus token-protected writes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/jwt", post(auth::issue_token))
        .route("/services", get(services::list_public))
        .route("/services/:id", get(services::get_one))
        .route("/reviews/:id", get(reviews::for_service));

    // Everything below needs a verified bearer token
    let protected = Router::new()
        .route("/allServices", get(services::list_all).post(services::create))
        .route("/allServices/:id", patch(services::update).delete(services::delete))
        .route("/addReview", post(reviews::add))
        .route("/MyReviews", get(reviews::mine))
        .route("/MyReviews/:id", patch(reviews::update).delete(reviews::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
