//! Error types for manifest parsing.

use thiserror::Error;

/// Errors raised when a manifest's overall shape is invalid.
///
/// Problems inside an individual entry (a missing or non-string field)
/// are not errors; the field is simply absent.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The bytes are not valid UTF-8.
    #[error("manifest is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The top-level value is not an object.
    #[error("manifest must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// The `licenses` field is absent.
    #[error("manifest has no \"licenses\" field")]
    MissingLicenses,

    /// The `licenses` field is present but not an array.
    #[error("\"licenses\" must be an array, found {found}")]
    LicensesNotArray { found: &'static str },

    /// An element of `licenses` is not an object.
    #[error("licenses[{index}] must be an object, found {found}")]
    EntryNotObject { index: usize, found: &'static str },
}

/// Convenience type alias for parse results.
pub type Result<T> = std::result::Result<T, ParseError>;
