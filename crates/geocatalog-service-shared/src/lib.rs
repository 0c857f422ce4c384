//! Shared HTTP infrastructure for the geocatalog service.
//!
//! - [`AppState`]: handle to the catalog stores, with blocking-pool dispatch
//! - [`ServiceConfig`]: store paths and port from the environment
//! - [`health`]: liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all catalog behavior lives in `geocatalog-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query / JSON body                                  │
//! │  - Validate parameters                                      │
//! │  - Call geocatalog-lib through AppState::run                │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory fixtures for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus, StoreCounts};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_candidates_scanned, record_nearby_query,
    record_nearby_results, record_place_inserted, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    from_json_rejection, from_lib_error, from_query_rejection, ProblemDetails,
    PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST, PROBLEM_SERVICE_UNAVAILABLE,
    PROBLEM_UNKNOWN_CITY, PROBLEM_UNKNOWN_STATE,
};
pub use request::{CreateCityRequest, CreateStateRequest, NearbyParams, PlacesFilter, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
