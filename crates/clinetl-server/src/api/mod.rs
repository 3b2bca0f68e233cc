//! Application assembly
//!
//! Builds the job engine from configuration and mounts the feature routes
//! together with the service-level endpoints and middleware stack.

use crate::config::{Config, StoreKind};
use crate::features;
use crate::ingest::{InMemoryRowStore, JobEngine, JobTable, PgRowStore, RowStore};
use crate::middleware;
use axum::{response::IntoResponse, routing::get, Json, Router};
use clinetl_common::types::HealthResponse;
use clinetl_ingest::CsvRecordSource;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "etl";

/// Create the row store selected by `ETL_STORE`
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn RowStore>> {
    match config.etl.store {
        StoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
                .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
                .connect(&config.database.url)
                .await?;

            tracing::info!("Database connection pool established");
            Ok(Arc::new(PgRowStore::new(pool)))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory row store; loaded rows are lost on restart");
            Ok(Arc::new(InMemoryRowStore::new()))
        }
    }
}

/// Create a job engine reading from the configured data directory
pub fn build_engine(config: &Config, store: Arc<dyn RowStore>) -> JobEngine {
    let source = CsvRecordSource::new(&config.etl.data_dir);
    tracing::info!(data_dir = %config.etl.data_dir.display(), "Reading source files");

    JobEngine::new(JobTable::new(), Arc::new(source), store)
}

/// Create the application router with all routes and middleware
pub fn create_router(engine: JobEngine, config: &Config) -> Router {
    let feature_routes = features::router(features::FeatureState { engine });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", feature_routes)
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Clinical ETL Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Liveness only; does not probe the row store
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
