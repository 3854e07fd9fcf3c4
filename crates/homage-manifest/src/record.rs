//! The [`LibraryRecord`] produced by parsing.

use serde::{Deserialize, Serialize};

/// One library as declared in a manifest.
///
/// Every field is optional and independent: a missing field is `None`,
/// never an empty string. Records are plain values; once handed to a
/// library catalog they are only reachable through shared references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Icon name or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Only present in newer manifests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Declared license code, `"license"` in the manifest.
    #[serde(rename = "license", skip_serializing_if = "Option::is_none")]
    pub license_code: Option<String>,
}

impl LibraryRecord {
    /// The name to show for this library, falling back to a placeholder.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}
