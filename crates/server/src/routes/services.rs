use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use tracing::info;

use models::service::Model;
use service::auth::{ensure_owner, TokenClaims};
use service::catalog::domain::{NewService, ServicePatch};
use service::pagination::ListLimit;
use service::results::{DeleteResult, InsertOneResult, UpdateResult};

use crate::errors::{AppError, JsonApiError};
use crate::extract::ApiJson;
use crate::routes::auth::ServerState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Positive integer caps the listing; anything else lists everything.
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    /// Must equal the email claim of the presented token.
    pub email: Option<String>,
}

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(ListQuery),
    responses((status = 200, description = "Services in insertion order"))
)]
pub async fn list_public(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Model>>, JsonApiError> {
    let list = state.catalog.list(ListLimit::parse(q.limit.as_deref())).await?;
    info!(count = list.len(), "list services");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service"),
        (status = 400, description = "Invalid Id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Model>, JsonApiError> {
    Ok(Json(state.catalog.get(&id).await?))
}

#[utoipa::path(
    get, path = "/allServices", tag = "services",
    params(OwnerQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All services"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or email mismatch")
    )
)]
pub async fn list_all(
    State(state): State<ServerState>,
    Extension(claims): Extension<TokenClaims>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<Model>>, AppError> {
    ensure_owner(&claims, q.email.as_deref())?;
    Ok(Json(state.catalog.list(ListLimit::none()).await?))
}

#[utoipa::path(
    post, path = "/allServices", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Inserted"),
        (status = 400, description = "Validation Error"),
        (status = 422, description = "Unknown or mistyped fields")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewService>,
) -> Result<Json<InsertOneResult>, JsonApiError> {
    Ok(Json(state.catalog.create(input).await?))
}

#[utoipa::path(
    patch, path = "/allServices/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::ServicePatchDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Update acknowledged"),
        (status = 400, description = "Invalid Id or empty patch")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ServicePatch>,
) -> Result<Json<UpdateResult>, JsonApiError> {
    Ok(Json(state.catalog.update(&id, patch).await?))
}

#[utoipa::path(
    delete, path = "/allServices/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
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
    Ok(Json(state.catalog.delete(&id).await?))
}
