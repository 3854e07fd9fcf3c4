//! Open-source attribution for applications.
//!
//! Homage reads one or more JSON manifests describing the third-party
//! libraries an application bundles, resolves each library's license code
//! against a [`LicenseCatalog`], and publishes the result as an immutable
//! snapshot for a presentation layer to render.
//!
//! ```
//! use std::sync::Arc;
//! use homage::{InlineSource, LibraryCatalog, LicenseCatalog};
//!
//! let licenses = Arc::new(LicenseCatalog::with_default_strings().unwrap());
//! let catalog = LibraryCatalog::builder(licenses)
//!     .source(InlineSource::new("bundled", r#"{"licenses":[{"name":"Foo","license":"MIT"}]}"#))
//!     .build()
//!     .unwrap();
//!
//! catalog.refresh().unwrap();
//! let libraries = catalog.libraries().unwrap();
//! assert_eq!(libraries[0].license_name().unwrap(), "MIT License");
//! ```
//!
//! # Modules
//!
//! - [`error`] — Error types for sources, state and configuration
//! - [`config`] — [`HomageConfig`], loadable from TOML
//! - [`source`] — The [`ManifestSource`] trait and file/inline sources
//! - [`icon`] — Icon resolution through an injected [`IconResolver`]
//! - [`library`] — [`Library`], a record plus its resolved license
//! - [`catalog`] — [`LibraryCatalog`], refresh and the published snapshot

pub mod catalog;
pub mod config;
pub mod error;
pub mod icon;
pub mod library;
pub mod source;

pub use catalog::{
    CatalogState, LibraryCatalog, LibraryCatalogBuilder, RefreshOutcome, RefreshReport,
};
pub use config::{CustomLicense, EmptyRefreshPolicy, HomageConfig};
pub use error::{CatalogError, ConfigError, Result, SourceError, StateError};
pub use icon::{DirectoryIcons, Icon, IconResolver, MapIcons, NoIcons};
pub use library::Library;
pub use source::{FileSource, InlineSource, ManifestSource};

// Re-export the building blocks.
pub use homage_license::{LicenseCatalog, LicenseEntry, RichText, Span, StringResolver};
pub use homage_manifest::{LibraryRecord, ParseError};
