use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::{AuthConfig, TokenService};
use service::catalog::{repository::SeaOrmCatalogRepository, CatalogService};
use service::reviews::{repository::SeaOrmReviewRepository, ReviewService};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Token service from the `[auth]` section; an empty secret refuses to start.
pub fn build_token_service(cfg: &AppConfig) -> Result<TokenService, StartupError> {
    let ttl = i64::try_from(cfg.auth.token_ttl_secs)
        .ok()
        .and_then(chrono::TimeDelta::try_seconds)
        .ok_or_else(|| StartupError::InvalidConfig("auth.token_ttl_secs out of range".into()))?;
    let auth_cfg = AuthConfig::new(cfg.auth.jwt_secret.clone()).with_ttl(ttl);
    TokenService::new(auth_cfg).map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

/// Load `.env`, start logging and read the layered configuration.
pub fn prepare() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_or_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(server = ?cfg.server, auth = ?cfg.auth, "configuration loaded");
    Ok(cfg)
}

/// Public entry: connect, migrate, serve until Ctrl+C, then close the pool.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let tokens = Arc::new(build_token_service(&cfg)?);

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let state = ServerState {
        catalog: CatalogService::new(Arc::new(SeaOrmCatalogRepository { db: db.clone() })),
        reviews: ReviewService::new(Arc::new(SeaOrmReviewRepository { db: db.clone() })),
        tokens,
    };
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "tripguide server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    models::db::close(db).await?;
    info!("server stopped");
    Ok(())
}
