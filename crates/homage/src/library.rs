//! [`Library`]: a parsed record together with its resolution.

use std::sync::Arc;

use homage_license::{LicenseEntry, RichText};
use homage_manifest::LibraryRecord;

use crate::error::StateError;
use crate::icon::Icon;

/// A library as exposed to the presentation layer.
///
/// Libraries published by a [`LibraryCatalog`](crate::LibraryCatalog) are
/// always resolved. A library built with [`Library::new`] is not, and its
/// license accessors return [`StateError::LicenseUnresolved`] instead of a
/// default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Library {
    record: LibraryRecord,
    license: Option<Arc<LicenseEntry>>,
    icon: Icon,
}

impl Library {
    /// Wrap a record without resolving it.
    pub fn new(record: LibraryRecord) -> Self {
        Self {
            record,
            license: None,
            icon: Icon::None,
        }
    }

    pub(crate) fn resolved(record: LibraryRecord, license: Arc<LicenseEntry>, icon: Icon) -> Self {
        Self {
            record,
            license: Some(license),
            icon,
        }
    }

    pub fn record(&self) -> &LibraryRecord {
        &self.record
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.record.version.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.record.description.as_deref()
    }

    pub fn year(&self) -> Option<&str> {
        self.record.year.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.record.owner.as_deref()
    }

    pub fn owner_url(&self) -> Option<&str> {
        self.record.owner_url.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.record.url.as_deref()
    }

    /// The code declared in the manifest, before resolution.
    pub fn license_code(&self) -> Option<&str> {
        self.record.license_code.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.license.is_some()
    }

    /// The resolved license entry, shared with the license catalog.
    pub fn license(&self) -> Result<&Arc<LicenseEntry>, StateError> {
        self.license
            .as_ref()
            .ok_or_else(|| StateError::LicenseUnresolved {
                library: self.record.display_name().to_string(),
            })
    }

    pub fn license_name(&self) -> Result<&str, StateError> {
        Ok(self.license()?.name())
    }

    pub fn license_url(&self) -> Result<&str, StateError> {
        Ok(self.license()?.url())
    }

    pub fn license_description(&self) -> Result<&RichText, StateError> {
        Ok(self.license()?.description())
    }

    /// Resolved icon; [`Icon::None`] for unresolved libraries.
    pub fn icon(&self) -> &Icon {
        &self.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LibraryRecord {
        LibraryRecord {
            name: Some("Foo".into()),
            owner_url: Some("https://foo.dev".into()),
            license_code: Some("mit".into()),
            ..Default::default()
        }
    }

    #[test]
    fn unresolved_license_reads_fail() {
        let library = Library::new(record());
        assert!(!library.is_resolved());
        let expected = StateError::LicenseUnresolved {
            library: "Foo".into(),
        };
        assert_eq!(library.license().unwrap_err(), expected);
        assert_eq!(library.license_name().unwrap_err(), expected);
        assert_eq!(library.license_url().unwrap_err(), expected);
        assert_eq!(library.license_description().unwrap_err(), expected);
    }

    #[test]
    fn record_fields_are_readable_before_resolution() {
        let library = Library::new(record());
        assert_eq!(library.name(), Some("Foo"));
        assert_eq!(library.owner_url(), Some("https://foo.dev"));
        assert_eq!(library.license_code(), Some("mit"));
        assert_eq!(library.version(), None);
        assert_eq!(library.icon(), &Icon::None);
    }

    #[test]
    fn resolved_library_exposes_license() {
        let entry = Arc::new(LicenseEntry::new(
            "MIT License",
            "https://opensource.org/licenses/MIT",
            RichText::plain("Short."),
        ));
        let library = Library::resolved(record(), Arc::clone(&entry), Icon::Placeholder);
        assert!(library.is_resolved());
        assert!(Arc::ptr_eq(library.license().unwrap(), &entry));
        assert_eq!(library.license_name().unwrap(), "MIT License");
        assert_eq!(library.license_url().unwrap(), "https://opensource.org/licenses/MIT");
        assert_eq!(library.license_description().unwrap().plain_text(), "Short.");
        assert_eq!(library.icon(), &Icon::Placeholder);
    }

    #[test]
    fn unnamed_library_is_described_in_errors() {
        let library = Library::new(LibraryRecord::default());
        assert_eq!(
            library.license_name().unwrap_err().to_string(),
            "license of <unnamed> has not been resolved"
        );
    }
}
