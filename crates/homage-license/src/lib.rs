//! License templates for Homage.
//!
//! A manifest names each library's license with a short code such as `mit`
//! or `apache-2.0`. This crate owns the table those codes are resolved
//! against.
//!
//! # Modules
//!
//! - [`error`] — Error types for catalog operations
//! - [`rich_text`] — [`RichText`], the small markup AST used for descriptions
//! - [`entry`] — [`LicenseEntry`], an immutable license template
//! - [`builtin`] — The seed table and the [`StringResolver`] that fills it
//! - [`legacy`] — Old license code spellings and their canonical keys
//! - [`catalog`] — [`LicenseCatalog`], the case-insensitive key table

pub mod builtin;
pub mod catalog;
pub mod entry;
pub mod error;
pub mod legacy;
pub mod rich_text;

pub use builtin::{DefaultStrings, MapStrings, StringResolver, NONE_KEY, UNRECOGNISED_KEY};
pub use catalog::LicenseCatalog;
pub use entry::LicenseEntry;
pub use error::{LicenseError, Result};
pub use legacy::translate_legacy_code;
pub use rich_text::{RichText, Span};
