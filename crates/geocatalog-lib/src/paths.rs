use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Error, Result};

/// Default filename of the hierarchy (states/cities) database.
pub const SQLITE_FILENAME: &str = "geocatalog.db";

/// Default filename of the place document database.
pub const DOCUMENTS_FILENAME: &str = "geocatalog_documents.db";

/// Locations of the two databases backing a [`crate::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub sqlite: PathBuf,
    pub documents: PathBuf,
}

impl StorePaths {
    pub fn new(sqlite: impl Into<PathBuf>, documents: impl Into<PathBuf>) -> Self {
        Self {
            sqlite: sqlite.into(),
            documents: documents.into(),
        }
    }

    /// Both databases side by side in `dir`, using the default filenames.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SQLITE_FILENAME), dir.join(DOCUMENTS_FILENAME))
    }

    /// Both databases in the platform data directory.
    pub fn platform_default() -> Result<Self> {
        Ok(Self::in_dir(&default_data_dir()?))
    }
}

/// Resolve the platform-specific data directory for geocatalog.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "geocatalog", "geocatalog")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}
