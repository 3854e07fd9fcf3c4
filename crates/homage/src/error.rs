//! Error types for the library catalog.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain raw manifest text from a source.
///
/// During a refresh these are logged and the source is skipped.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source descriptor itself is unusable (e.g. an empty path).
    #[error("invalid manifest source: {reason}")]
    InvalidDescriptor { reason: String },

    /// Nothing exists at the described location.
    #[error("manifest not found: {descriptor}")]
    NotFound { descriptor: String },

    /// Reading failed.
    #[error("failed to read {descriptor}: {source}")]
    Io {
        descriptor: String,
        #[source]
        source: std::io::Error,
    },
}

/// A library was read in the wrong state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// License-derived fields were read before the library was resolved.
    #[error("license of {library} has not been resolved")]
    LicenseUnresolved { library: String },
}

/// Errors from building or refreshing a [`LibraryCatalog`](crate::LibraryCatalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog was built without any usable manifest source.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("license error: {0}")]
    License(#[from] homage_license::LicenseError),

    /// A catalog lock was poisoned by a panicking thread.
    #[error("library catalog lock poisoned: {0}")]
    Poisoned(String),
}

/// Errors from loading a [`HomageConfig`](crate::HomageConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
