//! Manifest parsing for Homage.
//!
//! A manifest is a JSON document listing the third-party libraries bundled
//! by an application:
//!
//! ```json
//! { "licenses": [ { "name": "Foo", "version": "1.0", "license": "mit" } ] }
//! ```
//!
//! [`parse`] turns it into [`LibraryRecord`]s. Only the document shape is
//! strict; every field of an entry is optional.

pub mod error;
pub mod parser;
pub mod record;

pub use error::{ParseError, Result};
pub use parser::{parse, parse_bytes};
pub use record::LibraryRecord;
