//! Test utilities for handler testing.
//!
//! Every call builds fresh in-memory stores, so tests never share data.

use geocatalog_lib::{Catalog, Coordinates, NewPlace};

use crate::middleware::RequestId;
use crate::state::AppState;

/// Names and coordinates stored by [`seeded_state`].
pub mod fixture {
    pub const PARAIBA: &str = "Paraíba";
    pub const PERNAMBUCO: &str = "Pernambuco";

    pub const JOAO_PESSOA: &str = "João Pessoa";
    pub const RECIFE: &str = "Recife";

    /// Farol do Cabo Branco, João Pessoa.
    pub const FAROL: (&str, f64, f64) = ("Farol do Cabo Branco", -7.148, -34.797);
    /// Ponta do Seixas, about 1 km from the lighthouse.
    pub const SEIXAS: (&str, f64, f64) = ("Ponta do Seixas", -7.155, -34.793);
    /// Marco Zero, Recife, about 100 km south.
    pub const MARCO_ZERO: (&str, f64, f64) = ("Marco Zero", -8.063, -34.871);
}

/// Empty stores.
///
/// # Panics
///
/// Panics if an in-memory database cannot be opened.
pub fn test_state() -> AppState {
    let catalog = Catalog::open_in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory catalog: {e}"));
    AppState::from_catalog(catalog)
}

/// Two states, two cities and three places (see [`fixture`]).
///
/// # Panics
///
/// Panics if seeding fails.
pub fn seeded_state() -> AppState {
    let state = test_state();
    let catalog = state.catalog();

    let seed = || -> geocatalog_lib::Result<()> {
        let pb = catalog.hierarchy().add_state(fixture::PARAIBA)?;
        let pe = catalog.hierarchy().add_state(fixture::PERNAMBUCO)?;
        catalog.hierarchy().add_city(fixture::JOAO_PESSOA, pb)?;
        catalog.hierarchy().add_city(fixture::RECIFE, pe)?;

        for (city, (name, latitude, longitude)) in [
            (fixture::JOAO_PESSOA, fixture::FAROL),
            (fixture::RECIFE, fixture::MARCO_ZERO),
            (fixture::JOAO_PESSOA, fixture::SEIXAS),
        ] {
            catalog.add_place(NewPlace {
                name: name.to_string(),
                city: city.to_string(),
                coordinates: Coordinates::new(latitude, longitude),
                description: None,
            })?;
        }
        Ok(())
    };
    seed().unwrap_or_else(|e| panic!("failed to seed test catalog: {e}"));

    state
}

pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}
