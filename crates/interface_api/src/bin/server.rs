//! Product Catalog - API Server Binary
//!
//! This binary starts the HTTP API server for the product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin product-api
//!
//! # Run against a local SQLite file
//! API_DATABASE_URL=sqlite://products.db cargo run --bin product-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - `postgres://...` or `sqlite:...` connection string
//! * `DATABASE_URL` - Used when `API_DATABASE_URL` is not set
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `text` or `json` (default: text)

use std::net::SocketAddr;
use std::sync::Arc;

use domain_product::{ProductPort, ProductService};
use infra_db::{
    create_pool, run_migrations, DatabaseConfig, PostgresProductAdapter, SqliteProductAdapter,
};
use interface_api::config::{ApiConfig, StorageBackend};
use interface_api::create_router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, connects the storage adapter,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - An `API_*` variable cannot be parsed
/// - The database URL names an unsupported backend
/// - Database connection or migration fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level, config.json_logs());

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Product Catalog API Server"
    );

    let port = connect_storage(&config).await?;
    let service = ProductService::new(port);

    let app = create_router(service);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human-readable text
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (json_layer, text_layer) = if json {
        (Some(tracing_subscriber::fmt::layer().json().with_target(true)), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer().with_target(true)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Connects the storage adapter selected by the database URL.
///
/// PostgreSQL databases are migrated; SQLite databases get their table
/// created if missing.
async fn connect_storage(
    config: &ApiConfig,
) -> Result<Arc<dyn ProductPort>, Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::new(config.database_url.clone());

    match config.storage_backend()? {
        StorageBackend::Postgres => {
            tracing::info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config).await?;
            run_migrations(&pool).await?;
            tracing::info!("PostgreSQL ready");
            Ok(Arc::new(PostgresProductAdapter::new(pool)))
        }
        StorageBackend::Sqlite => {
            tracing::info!("Opening SQLite database...");
            let adapter = SqliteProductAdapter::connect(db_config).await?;
            tracing::info!("SQLite ready");
            Ok(Arc::new(adapter))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
