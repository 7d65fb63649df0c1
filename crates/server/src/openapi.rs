use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Arbitrary identity object; `email` is the claim the server checks.
#[derive(ToSchema)]
pub struct IdentityPayloadDoc { pub email: Option<String> }

#[derive(ToSchema)]
pub struct IssuedTokenDoc { pub token: String }

#[derive(ToSchema)]
pub struct NewServiceDoc { pub title: String, pub description: String, pub image: String, pub price: f64 }

#[derive(ToSchema)]
pub struct ServicePatchDoc {
    pub image: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct NewRatingDoc {
    pub service_id: Uuid,
    pub email: String,
    pub title: String,
    pub comment: String,
    pub rating: f64,
}

#[derive(ToSchema)]
pub struct RatingPatchDoc {
    pub title: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<f64>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::issue_token,
        crate::routes::services::list_public,
        crate::routes::services::get_one,
        crate::routes::services::list_all,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::reviews::add,
        crate::routes::reviews::for_service,
        crate::routes::reviews::mine,
        crate::routes::reviews::update,
        crate::routes::reviews::delete,
    ),
    components(
        schemas(
            HealthResponse,
            IdentityPayloadDoc,
            IssuedTokenDoc,
            NewServiceDoc,
            ServicePatchDoc,
            NewRatingDoc,
            RatingPatchDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "reviews")
    )
)]
pub struct ApiDoc;
