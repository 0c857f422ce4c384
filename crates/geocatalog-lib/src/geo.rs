//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula over a sphere of radius
//! [`EARTH_RADIUS_KM`]. Inputs are decimal degrees and are accepted as given;
//! range checks live in [`Coordinates::validate`] so that boundaries (HTTP,
//! CLI) can opt into them without burdening the hot path.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Valid latitude range in decimal degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in decimal degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside their decimal-degree range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (MIN_LAT..=MAX_LAT).contains(&self.latitude)
            && (MIN_LON..=MAX_LON).contains(&self.longitude)
    }

    /// Return `self` when valid, or [`Error::InvalidCoordinates`].
    pub fn validate(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Haversine distance between `origin` and `point` in kilometres.
///
/// The `asin` argument is clamped to `[0, 1]`: near-antipodal inputs can push
/// `a` a few ulps past 1.0, which would otherwise produce NaN.
pub fn distance_km(origin: Coordinates, point: Coordinates) -> f64 {
    let delta_lat = (point.latitude - origin.latitude).to_radians();
    let delta_lon = (point.longitude - origin.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + origin.latitude.to_radians().cos()
            * point.latitude.to_radians().cos()
            * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to three decimal places (metre resolution).
pub fn round_km(distance: f64) -> f64 {
    (distance * 1000.0).round() / 1000.0
}
