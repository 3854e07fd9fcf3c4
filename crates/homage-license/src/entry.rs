//! The [`LicenseEntry`] value type.

use serde::{Deserialize, Serialize};

use crate::rich_text::RichText;

/// An immutable license template: display name, reference URL and a
/// formatted description.
///
/// Entries live in a [`LicenseCatalog`](crate::LicenseCatalog) behind an
/// `Arc` and are shared by every library that resolves to them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseEntry {
    name: String,
    url: String,
    description: RichText,
}

impl LicenseEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>, description: RichText) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &RichText {
        &self.description
    }
}
