use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::PgServiceRecordRepository;
use application::ServiceRecordService;
use billables::{Clock, ServiceRecordRepository, SystemClock};
use config::ServerConfig;

/// Application service wired to trait objects so tests can swap the store
pub type AppServiceRecordService = ServiceRecordService<dyn ServiceRecordRepository, dyn Clock>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<AppServiceRecordService>,
    pub config: Arc<ServerConfig>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Billables API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🧾 Billables API initializing...");

    let config = ServerConfig::from_secrets(&secrets);
    match &config.cors_allowed_origin {
        Some(origin) => tracing::info!("🌐 CORS restricted to {}", origin),
        None => tracing::warn!("⚠️  No CORS_ALLOWED_ORIGIN set - allowing any origin"),
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    tracing::info!("✅ Database migrations completed");

    // Initialize application services
    let repo: Arc<dyn ServiceRecordRepository> = Arc::new(PgServiceRecordRepository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let records = Arc::new(ServiceRecordService::new(repo, clock));

    let state = AppState {
        records,
        config: Arc::new(config),
    };

    let router = routes::app(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Billables API ready");

    Ok(router.into())
}
