//! Geocatalog library entry points.
//!
//! This crate holds the haversine distance function and the radius search
//! built on it, together with the two stores the catalog is backed by: a
//! relational store for states and cities and a document store for places.
//! Higher-level consumers (HTTP service, CLI) should only depend on the
//! items exported here instead of reimplementing behavior.

pub mod catalog;
pub mod documents;
pub mod error;
pub mod geo;
pub mod hierarchy;
pub mod paths;
pub mod place;
pub mod proximity;
mod store;

pub use catalog::{Catalog, CityPlaces, NearbySearch};
pub use documents::PlaceStore;
pub use error::{Error, Result};
pub use geo::{distance_km, Coordinates, EARTH_RADIUS_KM};
pub use hierarchy::{City, CityId, CityListing, HierarchyStore, State, StateId};
pub use paths::{default_data_dir, StorePaths};
pub use place::{NewPlace, Place, PlaceId};
pub use proximity::{find_nearby, NearbyQuery, ProximityResult, DEFAULT_RADIUS_KM};
