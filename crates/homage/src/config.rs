//! [`HomageConfig`]: TOML configuration for manifests, custom licenses and
//! the empty-refresh policy.

use std::path::{Path, PathBuf};

use homage_license::{LicenseCatalog, LicenseError, RichText};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What a refresh that finds no libraries does to the published list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRefreshPolicy {
    /// Keep the previously published list.
    #[default]
    Preserve,
    /// Publish an empty list.
    Clear,
}

/// An extra license template declared in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLicense {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Parse `description` as the HTML subset instead of plain text.
    #[serde(default)]
    pub html: bool,
}

impl CustomLicense {
    /// Insert or overwrite this license in `catalog`.
    pub fn add_to(&self, catalog: &LicenseCatalog) -> Result<(), LicenseError> {
        let description = if self.html {
            RichText::from_html(&self.description)
        } else {
            RichText::plain(self.description.as_str())
        };
        catalog.add_license(
            &self.key,
            self.name.as_str(),
            self.url.as_str(),
            description,
        )
    }
}

/// Configuration for a Homage session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomageConfig {
    pub empty_refresh: EmptyRefreshPolicy,
    /// Added to the license catalog on top of the built-in templates.
    pub licenses: Vec<CustomLicense>,
    /// Manifest files to read.
    pub manifests: Vec<PathBuf>,
}

impl HomageConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Add every custom license to `catalog`, in declaration order.
    pub fn apply_licenses(&self, catalog: &LicenseCatalog) -> Result<(), LicenseError> {
        self.licenses
            .iter()
            .try_for_each(|custom| custom.add_to(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_on_empty_refresh() {
        let config = HomageConfig::default();
        assert_eq!(config.empty_refresh, EmptyRefreshPolicy::Preserve);
        assert!(config.licenses.is_empty());
        assert!(config.manifests.is_empty());
        assert_eq!(HomageConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn parses_full_config() {
        let config = HomageConfig::from_toml_str(
            r#"
            empty_refresh = "clear"
            manifests = ["licenses.json", "extra/more.json"]

            [[licenses]]
            key = "isc"
            name = "ISC License"
            url = "https://opensource.org/licenses/ISC"
            description = "<b>Permissive</b>"
            html = true

            [[licenses]]
            key = "proprietary"
            name = "Proprietary"
            "#,
        )
        .unwrap();
        assert_eq!(config.empty_refresh, EmptyRefreshPolicy::Clear);
        assert_eq!(config.manifests.len(), 2);
        assert_eq!(config.licenses.len(), 2);
        assert!(config.licenses[0].html);
        assert_eq!(config.licenses[1].url, "");
        assert!(!config.licenses[1].html);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(matches!(
            HomageConfig::from_toml_str(r#"empty_refresh = "sometimes""#),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HomageConfig::load(&dir.path().join("homage.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("homage.toml");
        std::fs::write(&path, "empty_refresh = \"preserve\"\n").unwrap();
        assert_eq!(HomageConfig::load(&path).unwrap(), HomageConfig::default());
    }

    #[test]
    fn custom_licenses_extend_catalog() {
        let config = HomageConfig {
            licenses: vec![
                CustomLicense {
                    key: "isc".into(),
                    name: "ISC License".into(),
                    url: String::new(),
                    description: "<b>Permissive</b><br>Short".into(),
                    html: true,
                },
                CustomLicense {
                    key: "raw".into(),
                    name: "Raw".into(),
                    url: String::new(),
                    description: "<b>not bold</b>".into(),
                    html: false,
                },
            ],
            ..Default::default()
        };
        let catalog = LicenseCatalog::with_default_strings().unwrap();
        config.apply_licenses(&catalog).unwrap();

        let isc = catalog.lookup("ISC").unwrap().unwrap();
        assert_eq!(isc.description().plain_text(), "Permissive\nShort");
        let raw = catalog.lookup("raw").unwrap().unwrap();
        assert_eq!(raw.description().plain_text(), "<b>not bold</b>");
    }

    #[test]
    fn empty_custom_key_fails() {
        let config = HomageConfig {
            licenses: vec![CustomLicense {
                key: String::new(),
                name: "Nameless".into(),
                url: String::new(),
                description: String::new(),
                html: false,
            }],
            ..Default::default()
        };
        let catalog = LicenseCatalog::with_default_strings().unwrap();
        assert!(matches!(
            config.apply_licenses(&catalog),
            Err(LicenseError::EmptyKey)
        ));
    }
}
