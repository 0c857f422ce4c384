//! Radius search over an in-memory candidate set.
//!
//! [`find_nearby`] is a pure transform: it reads the candidates, computes the
//! haversine distance from the origin to every place that has a coordinate,
//! keeps those inside the (inclusive) radius and returns annotated copies in
//! ascending distance order. Places without a usable coordinate are skipped.
//!
//! Ties keep their input order because the sort is stable, which makes
//! results reproducible for a given store ordering.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{distance_km, round_km, Coordinates};
use crate::place::Place;

/// Radius used when a query does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// A matching place annotated with its distance from the query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    #[serde(flatten)]
    pub place: Place,

    /// Great-circle distance in kilometres, rounded to three decimals.
    #[serde(rename = "distancia_km", alias = "distance_km")]
    pub distance_km: f64,
}

/// Origin and radius of a proximity search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub origin: Coordinates,
    pub radius_km: f64,
}

impl NearbyQuery {
    pub fn new(origin: Coordinates, radius_km: f64) -> Self {
        Self { origin, radius_km }
    }

    /// Query with [`DEFAULT_RADIUS_KM`].
    pub fn around(origin: Coordinates) -> Self {
        Self::new(origin, DEFAULT_RADIUS_KM)
    }

    /// Boundary validation: in-range origin, finite non-negative radius.
    ///
    /// [`find_nearby`] itself accepts any radius; a negative one simply
    /// matches nothing.
    pub fn validate(self) -> Result<Self> {
        self.origin.validate()?;
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(Error::InvalidRadius {
                radius: self.radius_km,
            });
        }
        Ok(self)
    }

    pub fn run(&self, candidates: &[Place]) -> Vec<ProximityResult> {
        find_nearby(self.origin, self.radius_km, candidates)
    }
}

/// Return the candidates within `radius_km` of `origin`, nearest first.
pub fn find_nearby(
    origin: Coordinates,
    radius_km: f64,
    candidates: &[Place],
) -> Vec<ProximityResult> {
    let mut results: Vec<ProximityResult> = candidates
        .iter()
        .filter_map(|place| {
            let point = place.coordinates()?;
            let distance = distance_km(origin, point);
            (distance <= radius_km).then(|| ProximityResult {
                place: place.clone(),
                distance_km: round_km(distance),
            })
        })
        .collect();

    // `sort_by` is stable; equal distances stay in candidate order.
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, latitude: f64, longitude: f64) -> Place {
        Place::new(name, "Test", Some(Coordinates::new(latitude, longitude)))
    }

    #[test]
    fn negative_radius_matches_nothing() {
        let origin = Coordinates::new(0.0, 0.0);
        let results = find_nearby(origin, -1.0, &[place("here", 0.0, 0.0)]);
        assert!(results.is_empty());
    }

    #[test]
    fn validate_rejects_negative_radius() {
        let query = NearbyQuery::new(Coordinates::new(0.0, 0.0), -0.5);
        assert!(matches!(query.validate(), Err(Error::InvalidRadius { .. })));
    }

    #[test]
    fn validate_rejects_non_finite_radius() {
        let query = NearbyQuery::new(Coordinates::new(0.0, 0.0), f64::NAN);
        assert!(query.validate().is_err());
        let query = NearbyQuery::new(Coordinates::new(0.0, 0.0), f64::INFINITY);
        assert!(query.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_origin() {
        let query = NearbyQuery::new(Coordinates::new(-91.0, 0.0), 1.0);
        assert!(matches!(
            query.validate(),
            Err(Error::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn around_uses_default_radius() {
        let query = NearbyQuery::around(Coordinates::new(1.0, 2.0));
        assert_eq!(query.radius_km, DEFAULT_RADIUS_KM);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn result_serializes_with_distance_field() {
        let result = ProximityResult {
            place: place("Farol", -7.148, -34.797),
            distance_km: 1.5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["nome_local"], "Farol");
        assert_eq!(json["distancia_km"], 1.5);
        assert_eq!(json["coordenadas"]["latitude"], -7.148);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let candidates = vec![place("a", 0.0, 0.0), place("b", 0.0, 0.01)];
        let before = candidates.clone();
        let _ = find_nearby(Coordinates::new(0.0, 0.0), 100.0, &candidates);
        assert_eq!(candidates, before);
    }
}
