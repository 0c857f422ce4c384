//! Application state for the HTTP service.
//!
//! Handlers reach the stores through [`AppState::run`], which moves the
//! blocking SQLite work onto tokio's blocking pool and converts failures
//! into [`ProblemDetails`].

use geocatalog_lib::{Catalog, Error as LibError};

use crate::config::ServiceConfig;
use crate::problem::{from_lib_error, ProblemDetails};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open one of the stores.
    StoreOpen(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen(e) => write!(f, "failed to open catalog stores: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::StoreOpen(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; the stores live behind the catalog's `Arc`s.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use geocatalog_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let cities = state.run("req-1", |catalog| catalog.hierarchy().list_cities()).await;
/// }
///
/// let state = AppState::load(&ServiceConfig::from_env()).unwrap();
/// let app = Router::new()
///     .route("/api/v1/cities", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    catalog: Catalog,
}

impl AppState {
    /// Open (creating if necessary) the databases named by `config`.
    pub fn load(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let paths = &config.store_paths;
        tracing::info!(
            sqlite = %paths.sqlite.display(),
            documents = %paths.documents.display(),
            "opening catalog stores"
        );
        let catalog = Catalog::open(paths)?;

        tracing::info!(
            states = catalog.hierarchy().count_states()?,
            cities = catalog.hierarchy().count_cities()?,
            places = catalog.places().count_places()?,
            "catalog stores ready"
        );

        Ok(Self::from_catalog(catalog))
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a catalog operation on the blocking pool.
    ///
    /// Library errors are mapped with [`from_lib_error`]; a panicked or
    /// cancelled task becomes a 500 problem.
    pub async fn run<T, F>(&self, request_id: &str, operation: F) -> Result<T, ProblemDetails>
    where
        T: Send + 'static,
        F: FnOnce(&Catalog) -> geocatalog_lib::Result<T> + Send + 'static,
    {
        let catalog = self.catalog.clone();
        match tokio::task::spawn_blocking(move || operation(&catalog)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                if !error.is_validation() {
                    tracing::error!(request_id, error = %error, "catalog operation failed");
                }
                Err(from_lib_error(&error, request_id))
            }
            Err(join_error) => {
                tracing::error!(request_id, error = %join_error, "catalog task did not complete");
                Err(ProblemDetails::internal_error(
                    "catalog task did not complete",
                    request_id,
                ))
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocatalog_lib::StorePaths;

    fn in_memory_state() -> AppState {
        AppState::from_catalog(Catalog::open_in_memory().unwrap())
    }

    #[test]
    fn test_app_state_clone_shares_stores() {
        let state1 = in_memory_state();
        let state2 = state1.clone();

        state1.catalog().hierarchy().add_state("Paraíba").unwrap();
        assert_eq!(state2.catalog().hierarchy().count_states().unwrap(), 1);
    }

    #[test]
    fn test_app_state_debug() {
        let debug = format!("{:?}", in_memory_state());
        assert!(debug.contains("AppState"));
        assert!(debug.contains("catalog"));
    }

    #[test]
    fn test_app_state_load_creates_databases() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            store_paths: StorePaths::in_dir(&dir.path().join("data")),
            port: 0,
        };

        let state = AppState::load(&config).unwrap();
        assert_eq!(state.catalog().places().count_places().unwrap(), 0);
        assert!(config.store_paths.sqlite.exists());
        assert!(config.store_paths.documents.exists());
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::from(LibError::StoreUnavailable { store: "hierarchy" });
        assert!(err.to_string().contains("hierarchy store is unavailable"));
    }

    #[tokio::test]
    async fn test_run_maps_errors_to_problems() {
        let state = in_memory_state();

        let ok = state
            .run("req-ok", |catalog| catalog.hierarchy().add_state("Paraíba"))
            .await
            .unwrap();
        assert!(ok >= 1);

        let problem = state
            .run("req-missing", |catalog| catalog.places_in_city(404))
            .await
            .unwrap_err();
        assert_eq!(problem.status, 404);
        assert_eq!(problem.instance.as_deref(), Some("req-missing"));
    }
}
