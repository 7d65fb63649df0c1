use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth::ServerState};
use service::auth::{AuthConfig, TokenService};
use service::catalog::{repository::mock::InMemoryCatalogRepository, CatalogService};
use service::reviews::{repository::mock::InMemoryReviewRepository, ReviewService};

struct TestApp {
    base_url: String,
}

// In-memory stores keep this runnable without Postgres
async fn start_server() -> anyhow::Result<TestApp> {
    let state = ServerState {
        catalog: CatalogService::new(Arc::new(InMemoryCatalogRepository::default())),
        reviews: ReviewService::new(Arc::new(InMemoryReviewRepository::default())),
        tokens: Arc::new(TokenService::new(AuthConfig::new("e2e-secret"))?),
    };
    let app = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_token_then_protected_write() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/jwt", app.base_url))
        .json(&json!({"email": "admin@tripguide.io"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap_or_default().to_string();

    let service = json!({
        "title": "Old town walk",
        "description": "Two hours through the old quarter",
        "image": "https://img.example.com/old-town.jpg",
        "price": 25
    });

    let res = client.post(format!("{}/allServices", app.base_url)).json(&service).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/allServices", app.base_url))
        .bearer_auth(&token)
        .json(&service)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let inserted = res.json::<Value>().await?;
    let id = inserted["insertedId"].as_str().unwrap_or_default().to_string();

    let res = client.get(format!("{}/services/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["title"], "Old town walk");

    let res = client
        .get(format!("{}/allServices", app.base_url))
        .query(&[("email", "someone@else.io")])
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_lists_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let doc: Value = reqwest::get(format!("{}/api-docs/openapi.json", app.base_url)).await?.json().await?;
    assert!(doc["paths"]["/jwt"].is_object());
    assert!(doc["paths"]["/MyReviews"].is_object());
    assert!(doc["paths"]["/allServices/{id}"].is_object());
    Ok(())
}
