use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use models::rating::Model;
use service::auth::{ensure_owner, TokenClaims};
use service::results::{DeleteResult, InsertOneResult, UpdateResult};
use service::reviews::domain::{NewRating, RatingPatch};

use crate::errors::{AppError, JsonApiError};
use crate::extract::ApiJson;
use crate::routes::auth::ServerState;
use crate::routes::services::OwnerQuery;

#[utoipa::path(
    post, path = "/addReview", tag = "reviews",
    request_body = crate::openapi::NewRatingDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Inserted"),
        (status = 400, description = "Validation Error or Invalid Id"),
        (status = 422, description = "Unknown or mistyped fields")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewRating>,
) -> Result<Json<InsertOneResult>, JsonApiError> {
    Ok(Json(state.reviews.create(input).await?))
}

#[utoipa::path(
    get, path = "/reviews/{id}", tag = "reviews",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Ratings for the service, newest first"),
        (status = 400, description = "Invalid Id")
    )
)]
pub async fn for_service(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Model>>, JsonApiError> {
    Ok(Json(state.reviews.list_for_service(&id).await?))
}

#[utoipa::path(
    get, path = "/MyReviews", tag = "reviews",
    params(OwnerQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's ratings, newest first"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or email mismatch")
    )
)]
pub async fn mine(
    State(state): State<ServerState>,
    Extension(claims): Extension<TokenClaims>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Model>>, AppError> {
    ensure_owner(&claims, q.email.as_deref())?;
    let email = q.email.unwrap_or_default();
    Ok(Json(state.reviews.list_by_author(&email).await?))
}

#[utoipa::path(
    patch, path = "/MyReviews/{id}", tag = "reviews",
    params(("id" = String, Path, description = "Rating id")),
    request_body = crate::openapi::RatingPatchDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Update acknowledged"),
        (status = 400, description = "Invalid Id or empty patch")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<RatingPatch>,
) -> Result<Json<UpdateResult>, JsonApiError> {
    Ok(Json(state.reviews.update(&id, patch).await?))
}

#[utoipa::path(
    delete, path = "/MyReviews/{id}", tag = "reviews",
    params(("id" = String, Path, description = "Rating id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Delete acknowledged"),
        (status = 400, description = "Invalid Id")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, JsonApiError> {
    Ok(Json(state.reviews.delete(&id).await?))
}
