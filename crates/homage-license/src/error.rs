//! Error types for license catalog operations.

use thiserror::Error;

/// Errors that can occur while building or extending a license catalog.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// License keys must be non-empty.
    #[error("license key must not be empty")]
    EmptyKey,

    /// The string resolver had no text for the requested identifier.
    #[error("no string for id: {id}")]
    MissingString { id: String },

    /// The catalog lock was poisoned by a panicking writer.
    #[error("license catalog lock poisoned: {0}")]
    Poisoned(String),
}

/// Convenience type alias for license operations.
pub type Result<T> = std::result::Result<T, LicenseError>;
