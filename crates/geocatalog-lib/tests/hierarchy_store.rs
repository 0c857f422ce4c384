//! Integration tests for the state/city hierarchy store.
//!
//! These tests verify:
//! - Idempotent, trimmed state creation
//! - City creation against existing and missing states
//! - The joined city listing and single-city lookups
//! - Persistence across reopen of a file-backed database

use geocatalog_lib::{CityListing, Error, HierarchyStore, Result};
use tempfile::tempdir;

#[test]
fn add_state_is_idempotent_by_name() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;

    let first = store.add_state("Paraíba")?;
    let second = store.add_state("Paraíba")?;
    let other = store.add_state("Pernambuco")?;

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(store.count_states()?, 2);
    Ok(())
}

#[test]
fn add_state_trims_and_rejects_blank_names() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;

    let id = store.add_state("  Paraíba ")?;
    assert_eq!(store.add_state("Paraíba")?, id);

    let states = store.list_states()?;
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].name, "Paraíba");

    let err = store.add_state("   ").expect_err("blank name rejected");
    assert!(matches!(err, Error::EmptyField { field: "nome" }));
    assert!(err.is_validation());
    Ok(())
}

#[test]
fn add_city_requires_existing_state() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;

    let err = store.add_city("Recife", 42).expect_err("state 42 missing");
    assert!(matches!(err, Error::UnknownState { id: 42 }));
    assert_eq!(store.count_cities()?, 0);

    let pe = store.add_state("Pernambuco")?;
    let recife = store.add_city("Recife", pe)?;
    assert!(recife >= 1);
    assert_eq!(store.count_cities()?, 1);
    Ok(())
}

#[test]
fn duplicate_city_names_get_distinct_ids() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;
    let pb = store.add_state("Paraíba")?;

    let a = store.add_city("Bayeux", pb)?;
    let b = store.add_city("Bayeux", pb)?;

    assert_ne!(a, b);
    let first = store.get_city_by_name("Bayeux")?.expect("city exists");
    assert_eq!(first.id, a.min(b));
    Ok(())
}

#[test]
fn list_cities_joins_state_names_in_creation_order() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;
    let pb = store.add_state("Paraíba")?;
    let pe = store.add_state("Pernambuco")?;

    let jp = store.add_city("João Pessoa", pb)?;
    let recife = store.add_city("Recife", pe)?;
    let cabedelo = store.add_city("Cabedelo", pb)?;

    let listing = store.list_cities()?;
    assert_eq!(
        listing,
        vec![
            CityListing {
                id: jp,
                name: "João Pessoa".to_string(),
                state_name: Some("Paraíba".to_string()),
            },
            CityListing {
                id: recife,
                name: "Recife".to_string(),
                state_name: Some("Pernambuco".to_string()),
            },
            CityListing {
                id: cabedelo,
                name: "Cabedelo".to_string(),
                state_name: Some("Paraíba".to_string()),
            },
        ]
    );
    Ok(())
}

#[test]
fn city_listing_serializes_dashboard_keys() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;
    let pb = store.add_state("Paraíba")?;
    store.add_city("João Pessoa", pb)?;

    let json = serde_json::to_value(store.list_cities()?).expect("serializes");
    assert_eq!(json[0]["cidade"], "João Pessoa");
    assert_eq!(json[0]["estado"], "Paraíba");
    assert!(json[0]["id"].is_i64());
    Ok(())
}

#[test]
fn get_city_lookups() -> Result<()> {
    let store = HierarchyStore::open_in_memory()?;
    let pb = store.add_state("Paraíba")?;
    let jp = store.add_city("João Pessoa", pb)?;

    let by_id = store.get_city_by_id(jp)?.expect("city by id");
    assert_eq!(by_id.name, "João Pessoa");
    assert_eq!(by_id.state_id, Some(pb));

    assert_eq!(store.get_city_by_name("João Pessoa")?, Some(by_id));
    assert!(store.get_city_by_id(jp + 100)?.is_none());
    assert!(store.get_city_by_name("joão pessoa")?.is_none());
    Ok(())
}

#[test]
fn file_backed_store_persists_across_reopen() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("geocatalog.db");

    {
        let store = HierarchyStore::open(&path)?;
        let pb = store.add_state("Paraíba")?;
        store.add_city("João Pessoa", pb)?;
    }

    let reopened = HierarchyStore::open_existing(&path)?;
    assert_eq!(reopened.count_states()?, 1);
    assert_eq!(reopened.count_cities()?, 1);
    reopened.ping()?;
    Ok(())
}

#[test]
fn open_existing_reports_missing_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing.db");

    let err = HierarchyStore::open_existing(&path).expect_err("file is absent");
    assert!(matches!(err, Error::DatabaseNotFound { path: p } if p == path));
    assert!(!path.exists());
    Ok(())
}
