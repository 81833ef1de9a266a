//! Fixtures
//!
//! Price tables stored as YAML, e.g.
//!
//! ```yaml
//! currency: GBP
//! items:
//!   - code: A
//!     price: 50
//!     offers: "3A for 130, 5A for 200"
//!   - code: B
//!     price: 30
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::catalog::CatalogFixture,
};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The price table describes an invalid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Parse a price table from YAML text.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed or describes an invalid catalog.
pub fn parse_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    Catalog::try_from(fixture)
}

/// Load a price table from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed, or describes an
/// invalid catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;

    debug!(path = %path.display(), items = catalog.len(), "loaded catalog");

    Ok(catalog)
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Fixture {
    /// Create a fixture reader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture reader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the named catalog fixture
    pub fn catalog_path(&self, name: &str) -> PathBuf {
        self.base_path.join("catalogs").join(format!("{name}.yml"))
    }

    /// Load the named catalog, e.g. `standard` for `catalogs/standard.yml`
    ///
    /// # Errors
    ///
    /// See [`load_catalog`].
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        load_catalog(self.catalog_path(name))
    }

    /// Load a named catalog from the default base path
    ///
    /// # Errors
    ///
    /// See [`load_catalog`].
    pub fn from_set(name: &str) -> Result<Catalog, FixtureError> {
        Self::new().load_catalog(name)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
