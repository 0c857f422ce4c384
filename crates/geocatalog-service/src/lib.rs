//! geocatalog HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/states`, `GET /api/v1/states`
//! - `POST /api/v1/cities`, `GET /api/v1/cities`
//! - `GET /api/v1/cities/{id}/places` - places filed under a city
//! - `POST /api/v1/places`, `GET /api/v1/places?city=`
//! - `GET /api/v1/places/nearby?lat=&lon=&radius_km=` - radius search, as a
//!   JSON array nearest first
//! - `GET /health/live`, `GET /health/ready` - probes
//! - `GET /metrics` - Prometheus exposition (when enabled)
//!
//! The dashboard's paths are served as well: `POST /estado`, `POST /cidade`,
//! `GET /cidades`, `GET /cidades/{id}/locais`, `POST /local`,
//! `GET /locais?cidade=` and `GET /locais/proximos?lat=&lon=&raio_km=`.
//! Its listings are bare JSON arrays.

mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use geocatalog_service_shared::{health_live, health_ready, metrics_handler, AppState, MetricsLayer};

pub use handlers::{CityCreated, CityList, PlaceCreated, PlaceList, StateCreated, StateList};

/// Build the application router.
///
/// `metrics_path` mounts the Prometheus endpoint; pass `None` to leave it
/// out.
pub fn build_router(state: AppState, metrics_path: Option<&str>) -> Router {
    let api = Router::new()
        .route(
            "/api/v1/states",
            post(handlers::create_state).get(handlers::list_states),
        )
        .route(
            "/api/v1/cities",
            post(handlers::create_city).get(handlers::list_cities),
        )
        .route("/api/v1/cities/{id}/places", get(handlers::city_places))
        .route(
            "/api/v1/places",
            post(handlers::create_place).get(handlers::list_places),
        )
        .route("/api/v1/places/nearby", get(handlers::nearby_places))
        .route("/estado", post(handlers::create_state))
        .route("/cidade", post(handlers::create_city))
        .route("/cidades", get(handlers::dashboard_cities))
        .route("/cidades/{id}/locais", get(handlers::city_places))
        .route("/local", post(handlers::create_place))
        .route("/locais", get(handlers::dashboard_places))
        .route("/locais/proximos", get(handlers::nearby_places))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    let api = match metrics_path {
        Some(path) => api.route(path, get(metrics_handler)),
        None => api,
    };

    api.layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
