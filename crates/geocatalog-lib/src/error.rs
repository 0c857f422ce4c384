use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the geocatalog library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A database file was expected at the given path but does not exist.
    #[error("database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default data location")]
    ProjectDirsUnavailable,

    /// Raised when a city id does not exist in the hierarchy store.
    #[error("unknown city id: {id}")]
    UnknownCity { id: i64 },

    /// Raised when a city references a state id that does not exist.
    #[error("unknown state id: {id}")]
    UnknownState { id: i64 },

    /// Raised when a coordinate falls outside the decimal-degree ranges.
    #[error("invalid coordinates ({latitude}, {longitude}); out of range")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Raised when a search radius is negative or not a finite number.
    #[error("invalid search radius {radius}; must be finite and non-negative")]
    InvalidRadius { radius: f64 },

    /// Raised when a required name field is blank.
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// The connection lock of a store was poisoned by a panicking holder.
    #[error("{store} store is unavailable")]
    StoreUnavailable { store: &'static str },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for document (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error describes caller input rather than a storage failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCoordinates { .. }
                | Error::InvalidRadius { .. }
                | Error::EmptyField { .. }
        )
    }
}

/// Reject blank names, returning the trimmed value otherwise.
pub(crate) fn require_name<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField { field });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_trims() {
        assert_eq!(require_name("  Paraíba ", "nome").unwrap(), "Paraíba");
    }

    #[test]
    fn require_name_rejects_blank() {
        let err = require_name("   ", "nome").unwrap_err();
        assert!(matches!(err, Error::EmptyField { field: "nome" }));
        assert!(err.is_validation());
    }

    #[test]
    fn storage_errors_are_not_validation() {
        let err = Error::StoreUnavailable { store: "hierarchy" };
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "hierarchy store is unavailable");
    }
}
