//! geocatalog HTTP service binary.
//!
//! # Configuration
//!
//! - `GEOCATALOG_SQLITE_PATH` - states/cities database (default: geocatalog.db)
//! - `GEOCATALOG_DOCUMENTS_PATH` - place documents database (default: geocatalog_documents.db)
//! - `SERVICE_PORT` - HTTP port (default: 8000)
//! - `LOG_FORMAT`, `RUST_LOG` - logging (default: json, info)
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint (default: true, /metrics)

use std::net::SocketAddr;

use tracing::{error, info, warn};

use geocatalog_service::build_router;
use geocatalog_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env().with_service("geocatalog"));

    let config = ServiceConfig::from_env();
    let metrics = MetricsConfig::from_env();

    let metrics_path = match init_metrics(&metrics) {
        Ok(()) => Some(metrics.path.as_str()),
        Err(e) => {
            warn!(error = %e, "metrics endpoint disabled");
            None
        }
    };

    info!(
        sqlite = %config.store_paths.sqlite.display(),
        documents = %config.store_paths.documents.display(),
        port = config.port,
        "starting geocatalog service"
    );

    let state = AppState::load(&config).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    let app = build_router(state, metrics_path);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
