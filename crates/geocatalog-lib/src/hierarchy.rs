//! Relational store for the state → city hierarchy.
//!
//! Two tables, created on open if missing:
//!
//! ```text
//! states (id INTEGER PK, name TEXT UNIQUE)
//! cities (id INTEGER PK, name TEXT, state_id INTEGER → states.id)
//! ```
//!
//! State creation is idempotent by name. City creation checks that the
//! referenced state exists and fails with [`Error::UnknownState`] otherwise.

use std::path::Path;

use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{require_name, Error, Result};
use crate::store::SqliteHandle;

/// Numeric identifier for a state.
pub type StateId = i64;

/// Numeric identifier for a city.
pub type CityId = i64;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;
CREATE TABLE IF NOT EXISTS states (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS cities (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    state_id INTEGER,
    FOREIGN KEY(state_id) REFERENCES states(id)
);
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
}

/// A city row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    /// Rows written before the state check existed may lack a state.
    #[serde(rename = "estado_id", alias = "state_id")]
    pub state_id: Option<StateId>,
}

/// A city joined with its state's name, as listed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityListing {
    pub id: CityId,
    #[serde(rename = "cidade", alias = "name")]
    pub name: String,
    #[serde(rename = "estado", alias = "state_name")]
    pub state_name: Option<String>,
}

/// SQLite-backed hierarchy store.
#[derive(Debug)]
pub struct HierarchyStore {
    handle: SqliteHandle,
}

impl HierarchyStore {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open("hierarchy", path.as_ref(), SCHEMA)?,
        })
    }

    /// Open an existing database, failing with [`Error::DatabaseNotFound`].
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open_existing("hierarchy", path.as_ref(), SCHEMA)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open_in_memory("hierarchy", SCHEMA)?,
        })
    }

    /// Insert a state if no state with this name exists; return its id.
    pub fn add_state(&self, name: &str) -> Result<StateId> {
        let name = require_name(name, "nome")?;
        self.handle.with_connection(|conn| {
            let tx = conn.transaction()?;
            let inserted = tx.execute("INSERT OR IGNORE INTO states(name) VALUES (?1)", [name])?;
            let id: StateId = tx.query_row(
                "SELECT id FROM states WHERE name = ?1",
                [name],
                |row| row.get(0),
            )?;
            tx.commit()?;
            debug!(state_id = id, created = inserted > 0, "add_state");
            Ok(id)
        })
    }

    /// Insert a city under an existing state; return the new city id.
    pub fn add_city(&self, name: &str, state_id: StateId) -> Result<CityId> {
        let name = require_name(name, "nome")?;
        self.handle.with_connection(|conn| {
            let tx = conn.transaction()?;
            let state_exists = tx
                .query_row("SELECT 1 FROM states WHERE id = ?1", [state_id], |_| Ok(()))
                .optional()?
                .is_some();
            if !state_exists {
                return Err(Error::UnknownState { id: state_id });
            }
            tx.execute(
                "INSERT INTO cities(name, state_id) VALUES (?1, ?2)",
                params![name, state_id],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            debug!(city_id = id, state_id, "add_city");
            Ok(id)
        })
    }

    pub fn list_states(&self) -> Result<Vec<State>> {
        self.handle.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM states ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(State {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    /// All cities with their state's name, in creation order.
    pub fn list_cities(&self) -> Result<Vec<CityListing>> {
        self.handle.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.name, s.name
                 FROM cities c LEFT JOIN states s ON c.state_id = s.id
                 ORDER BY c.id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(CityListing {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    state_name: row.get(2)?,
                })
            })?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
    }

    pub fn get_city_by_id(&self, id: CityId) -> Result<Option<City>> {
        self.handle.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, state_id FROM cities WHERE id = ?1",
                    [id],
                    row_to_city,
                )
                .optional()?)
        })
    }

    /// First city (lowest id) with exactly this name.
    pub fn get_city_by_name(&self, name: &str) -> Result<Option<City>> {
        self.handle.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name, state_id FROM cities WHERE name = ?1 ORDER BY id LIMIT 1",
                    [name],
                    row_to_city,
                )
                .optional()?)
        })
    }

    pub fn count_states(&self) -> Result<usize> {
        self.count("states")
    }

    pub fn count_cities(&self) -> Result<usize> {
        self.count("cities")
    }

    fn count(&self, table: &'static str) -> Result<usize> {
        self.handle.with_connection(|conn| {
            let n: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {table}"),
                [],
                |row| row.get(0),
            )?;
            Ok(n as usize)
        })
    }

    pub fn ping(&self) -> Result<()> {
        self.handle.ping()
    }
}

fn row_to_city(row: &Row<'_>) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get(0)?,
        name: row.get(1)?,
        state_id: row.get(2)?,
    })
}
