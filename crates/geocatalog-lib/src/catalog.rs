//! The two stores behind one handle, plus the queries that span them.
//!
//! A [`Catalog`] is cheap to clone and is what the HTTP state and the CLI
//! hold. Operations that need both stores (places of a city id, radius
//! search with boundary validation) live here so that every caller applies
//! the same rules.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::documents::PlaceStore;
use crate::error::{Error, Result};
use crate::hierarchy::{CityId, HierarchyStore, StateId};
use crate::paths::StorePaths;
use crate::place::{NewPlace, Place, PlaceId};
use crate::proximity::{NearbyQuery, ProximityResult};

/// Places registered under a city, resolved through the hierarchy store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPlaces {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado_id")]
    pub state_id: Option<StateId>,
    #[serde(rename = "locais")]
    pub places: Vec<Place>,
}

/// Outcome of a radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub query: NearbyQuery,
    /// Number of candidates fetched from the document store.
    pub candidates_scanned: usize,
    pub results: Vec<ProximityResult>,
}

/// Shared handle to the hierarchy and place stores.
#[derive(Debug, Clone)]
pub struct Catalog {
    hierarchy: Arc<HierarchyStore>,
    places: Arc<PlaceStore>,
}

impl Catalog {
    pub fn new(hierarchy: HierarchyStore, places: PlaceStore) -> Self {
        Self {
            hierarchy: Arc::new(hierarchy),
            places: Arc::new(places),
        }
    }

    /// Open (creating if necessary) both databases.
    pub fn open(paths: &StorePaths) -> Result<Self> {
        Ok(Self::new(
            HierarchyStore::open(&paths.sqlite)?,
            PlaceStore::open(&paths.documents)?,
        ))
    }

    /// Open both databases, failing with [`Error::DatabaseNotFound`] if
    /// either file is missing.
    pub fn open_existing(paths: &StorePaths) -> Result<Self> {
        Ok(Self::new(
            HierarchyStore::open_existing(&paths.sqlite)?,
            PlaceStore::open_existing(&paths.documents)?,
        ))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(
            HierarchyStore::open_in_memory()?,
            PlaceStore::open_in_memory()?,
        ))
    }

    pub fn hierarchy(&self) -> &HierarchyStore {
        &self.hierarchy
    }

    pub fn places(&self) -> &PlaceStore {
        &self.places
    }

    /// Validate and store a new place.
    pub fn add_place(&self, place: NewPlace) -> Result<PlaceId> {
        let place = place.into_place()?;
        self.places.insert_place(&place)
    }

    /// Look the city up by id, then fetch the places filed under its name.
    pub fn places_in_city(&self, city_id: CityId) -> Result<CityPlaces> {
        let city = self
            .hierarchy
            .get_city_by_id(city_id)?
            .ok_or(Error::UnknownCity { id: city_id })?;
        let places = self.places.list_places_by_city(&city.name)?;

        Ok(CityPlaces {
            city: city.name,
            state_id: city.state_id,
            places,
        })
    }

    /// Validate `query`, load every place and rank those within the radius.
    pub fn nearby(&self, query: NearbyQuery) -> Result<NearbySearch> {
        let query = query.validate()?;
        let candidates = self.places.list_all_places()?;
        let results = query.run(&candidates);

        debug!(
            candidates = candidates.len(),
            matched = results.len(),
            radius_km = query.radius_km,
            "nearby search"
        );

        Ok(NearbySearch {
            query,
            candidates_scanned: candidates.len(),
            results,
        })
    }
}
