//! Request types and validation for HTTP endpoints.
//!
//! Field names follow the dashboard's Portuguese keys; the English names are
//! accepted as aliases.

use serde::{Deserialize, Serialize};

use geocatalog_lib::{Coordinates, NearbyQuery, NewPlace, DEFAULT_RADIUS_KM};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn require_field(value: &str, field: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.trim().is_empty() {
        return Err(Box::new(ProblemDetails::bad_request(
            format!("The '{field}' field is required and cannot be empty"),
            request_id,
        )));
    }
    Ok(())
}

/// Body of `POST /api/v1/states`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStateRequest {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
}

impl Validate for CreateStateRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_field(&self.name, "nome", request_id)
    }
}

/// Body of `POST /api/v1/cities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCityRequest {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,

    #[serde(rename = "estado_id", alias = "state_id")]
    pub state_id: i64,
}

impl Validate for CreateCityRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_field(&self.name, "nome", request_id)?;

        if self.state_id < 1 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'estado_id' field must be a positive integer",
                request_id,
            )));
        }

        Ok(())
    }
}

/// `POST /api/v1/places` takes a [`NewPlace`] body.
impl Validate for NewPlace {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        require_field(&self.name, "nome_local", request_id)?;
        require_field(&self.city, "cidade", request_id)?;
        self.coordinates
            .validate()
            .map(|_| ())
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

/// Query string of `GET /api/v1/places/nearby`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lon: f64,

    /// Search radius in kilometres.
    #[serde(default = "default_radius_km", alias = "raio_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

impl NearbyParams {
    pub fn to_query(self) -> NearbyQuery {
        NearbyQuery::new(Coordinates::new(self.lat, self.lon), self.radius_km)
    }
}

impl Validate for NearbyParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.to_query()
            .validate()
            .map(|_| ())
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

/// Query string of `GET /api/v1/places`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesFilter {
    /// Exact city name; all places when absent.
    #[serde(default, alias = "cidade")]
    pub city: Option<String>,
}
