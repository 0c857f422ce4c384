//! Document store for place records.
//!
//! Places are kept as JSON documents in their own SQLite database, separate
//! from the hierarchy store. Only the identifier and the city name are
//! lifted into columns (for lookup); everything else lives in the document
//! body and is returned as written. Listing preserves insertion order.

use std::path::Path;

use rusqlite::{params, Row};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::place::{Place, PlaceId};
use crate::store::SqliteHandle;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS places (
    seq      INTEGER PRIMARY KEY AUTOINCREMENT,
    id       TEXT NOT NULL UNIQUE,
    city     TEXT NOT NULL,
    document TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS places_city ON places(city);
";

/// SQLite-backed JSON document store for places.
#[derive(Debug)]
pub struct PlaceStore {
    handle: SqliteHandle,
}

impl PlaceStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open("documents", path.as_ref(), SCHEMA)?,
        })
    }

    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open_existing("documents", path.as_ref(), SCHEMA)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            handle: SqliteHandle::open_in_memory("documents", SCHEMA)?,
        })
    }

    /// Store a place document and return its newly assigned identifier.
    ///
    /// Any `id` already present on `place` is ignored.
    pub fn insert_place(&self, place: &Place) -> Result<PlaceId> {
        let id = Uuid::now_v7().simple().to_string();
        let body = serde_json::to_string(&Place {
            id: None,
            ..place.clone()
        })?;

        self.handle.with_connection(|conn| {
            conn.execute(
                "INSERT INTO places(id, city, document) VALUES (?1, ?2, ?3)",
                params![id, place.city, body],
            )?;
            Ok(())
        })?;

        debug!(place_id = %id, city = %place.city, "inserted place");
        Ok(id)
    }

    /// Every stored place, oldest first.
    pub fn list_all_places(&self) -> Result<Vec<Place>> {
        self.select("SELECT id, document FROM places ORDER BY seq", None)
    }

    /// Places whose city name equals `city` exactly, oldest first.
    pub fn list_places_by_city(&self, city: &str) -> Result<Vec<Place>> {
        self.select(
            "SELECT id, document FROM places WHERE city = ?1 ORDER BY seq",
            Some(city),
        )
    }

    pub fn count_places(&self) -> Result<usize> {
        self.handle.with_connection(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM places", [], |row| row.get(0))?;
            Ok(n as usize)
        })
    }

    pub fn ping(&self) -> Result<()> {
        self.handle.ping()
    }

    fn select(&self, sql: &str, city: Option<&str>) -> Result<Vec<Place>> {
        let rows: Vec<(String, String)> = self.handle.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = match city {
                Some(city) => stmt
                    .query_map([city], id_and_document)?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
                None => stmt
                    .query_map([], id_and_document)?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
            };
            Ok(rows)
        })?;

        let mut places = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for (id, document) in rows {
            match serde_json::from_str::<Place>(&document) {
                Ok(mut place) => {
                    place.id = Some(id);
                    places.push(place);
                }
                Err(err) => {
                    skipped += 1;
                    debug!(place_id = %id, error = %err, "unreadable place document");
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "ignored documents that could not be parsed as places");
        }

        Ok(places)
    }
}

fn id_and_document(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get(0)?, row.get(1)?))
}
