//! Health check handlers for liveness and readiness probes.
//!
//! `/health/live` only proves the process answers. `/health/ready` queries
//! both stores and reports their record counts, replying 503 when either
//! store cannot be read.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use geocatalog_lib::Catalog;

use crate::AppState;

/// Record counts reported by the readiness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub states: usize,
    pub cities: usize,
    pub places: usize,
}

impl StoreCounts {
    /// Ping both stores and count their records.
    pub fn collect(catalog: &Catalog) -> geocatalog_lib::Result<Self> {
        let hierarchy = catalog.hierarchy();
        let places = catalog.places();
        hierarchy.ping()?;
        places.ping()?;

        Ok(Self {
            states: hierarchy.count_states()?,
            cities: hierarchy.count_cities()?,
            places: places.count_places()?,
        })
    }
}

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Store record counts (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stores: Option<StoreCounts>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            stores: None,
        }
    }

    pub fn ready(service: &str, version: &str, stores: StoreCounts) -> Self {
        Self {
            stores: Some(stores),
            ..Self::alive(service, version)
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"geocatalog-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"...","version":"0.1.0","stores":{"states":2,"cities":5,"places":40}}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let catalog = state.catalog().clone();
    let counts = tokio::task::spawn_blocking(move || StoreCounts::collect(&catalog)).await;

    match counts {
        Ok(Ok(stores)) => {
            let status = HealthStatus::ready(service, version, stores);
            (StatusCode::OK, Json(status)).into_response()
        }
        Ok(Err(error)) => {
            tracing::warn!(error = %error, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, &error.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
        Err(join_error) => {
            tracing::warn!(error = %join_error, "readiness check did not complete");
            let status = HealthStatus::not_ready(service, version, "store check did not complete");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert_eq!(status.version, "1.0.0");
        assert!(status.stores.is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let counts = StoreCounts {
            states: 1,
            cities: 2,
            places: 3,
        };
        let status = HealthStatus::ready("test-service", "1.0.0", counts);
        assert_eq!(status.status, "ok");
        assert_eq!(status.stores, Some(counts));
    }

    #[test]
    fn test_health_status_not_ready() {
        let status =
            HealthStatus::not_ready("test-service", "1.0.0", "documents store is unavailable");
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("documents"));
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("geocatalog", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"service\":\"geocatalog\""));
        assert!(!json.contains("stores")); // skip_serializing_if
    }

    #[test]
    fn test_store_counts_collect() {
        let catalog = Catalog::open_in_memory().unwrap();
        let pb = catalog.hierarchy().add_state("Paraíba").unwrap();
        catalog.hierarchy().add_city("João Pessoa", pb).unwrap();
        catalog.hierarchy().add_city("Cabedelo", pb).unwrap();

        let counts = StoreCounts::collect(&catalog).unwrap();
        assert_eq!(
            counts,
            StoreCounts {
                states: 1,
                cities: 2,
                places: 0
            }
        );
    }
}
