//! Classic Models Sales Analytics Dashboard
//!
//! Loads a read-only SQLite snapshot of the Classic Models database, runs the
//! report library over it and serves the results as dashboard pages and JSON.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod adapters;
mod app;
mod auth;
mod config;
mod dashboard;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{SqliteReportRunner, SqliteSalesRepository};
use app::{DatasetService, ReportCatalog};
use config::Config;
use dashboard::{build_dashboard, Dashboard};

/// Filter used when neither RUST_LOG nor LOG_LEVEL is set
const DEFAULT_LOG_FILTER: &str = "info,salesdash_api=debug";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset_service: Arc<DatasetService<SqliteSalesRepository>>,
    pub report_catalog: Arc<ReportCatalog<SqliteReportRunner>>,
    pub dashboard: Arc<Dashboard>,
    /// SHA-256 of ADMIN_TOKEN; reload is disabled when `None`
    pub admin_token_hash: Option<String>,
}

impl AppState {
    /// Wire adapters and services over one connection. Datasets start empty
    /// until [`DatasetService::initialize`] runs.
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let sales_repo = Arc::new(SqliteSalesRepository::new(db.clone()));
        let report_runner = Arc::new(SqliteReportRunner::new(db));

        Self {
            dataset_service: Arc::new(DatasetService::new(
                sales_repo,
                config.cross_sell_min_cooccurrence,
            )),
            report_catalog: Arc::new(ReportCatalog::new(
                config.queries_dir.clone(),
                report_runner,
                config.cross_sell_min_cooccurrence,
            )),
            dashboard: Arc::new(build_dashboard(&config.dashboard_title)),
            admin_token_hash: config.admin_token.as_deref().map(auth::hash_token),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router. Serve it with connect info: the reload rate limiter
/// keys on the peer address.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .context("Failed to build governor config")?,
    );

    // Admin routes (rate limited, bearer token)
    let admin_routes = Router::new()
        .route("/admin/reload", post(handlers::reload))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_middleware,
        ))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let app = Router::new()
        // Health check
        .route("/health", get(health))
        // Dashboard pages (HTML or JSON)
        .route("/", get(handlers::root))
        .route("/pages/:slug", get(handlers::get_page))
        // JSON API
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/datasets", get(handlers::list_datasets))
        .route("/api/datasets/:name", get(handlers::get_dataset))
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/:area/:name", get(handlers::run_report))
        .merge(admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// RUST_LOG, then LOG_LEVEL, then the default filter
fn env_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| log_level.and_then(|level| EnvFilter::try_new(level).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(env_filter(config.log_level.as_deref()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sales dashboard...");

    if !config.db_path.exists() {
        anyhow::bail!("Database not found at: {}", config.db_path.display());
    }

    // Open the snapshot read-only
    tracing::info!(path = %config.db_path.display(), "Connecting to database...");
    let db = Database::connect(config.database_url())
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::new(db, &config);
    state.dataset_service.initialize().await;
    if !config.reload_enabled() {
        tracing::info!("ADMIN_TOKEN not set, /admin/reload is disabled");
    }

    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
