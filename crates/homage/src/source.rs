//! Manifest sources.
//!
//! A [`ManifestSource`] produces the raw text of one manifest. Where the
//! text comes from (a file, an embedded resource, the network) is up to the
//! implementation; the catalog only sees text or a [`SourceError`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Something that can produce the raw text of a manifest.
pub trait ManifestSource: Send + Sync {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    /// Read the manifest text.
    fn read(&self) -> Result<String, SourceError>;
}

/// A manifest stored on the filesystem.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ManifestSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<String, SourceError> {
        if self.path.as_os_str().is_empty() {
            return Err(SourceError::InvalidDescriptor {
                reason: "empty manifest path".into(),
            });
        }
        std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound {
                descriptor: self.describe(),
            },
            _ => SourceError::Io {
                descriptor: self.describe(),
                source: e,
            },
        })
    }
}

/// Manifest text held in memory, typically embedded with `include_str!`.
#[derive(Clone, Debug)]
pub struct InlineSource {
    label: String,
    text: String,
}

impl InlineSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

impl ManifestSource for InlineSource {
    fn describe(&self) -> String {
        format!("inline:{}", self.label)
    }

    fn read(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"licenses":[]}}"#).unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.read().unwrap(), r#"{"licenses":[]}"#);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("absent.json"));
        assert!(matches!(source.read(), Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn empty_path_is_invalid() {
        let source = FileSource::new("");
        assert!(matches!(
            source.read(),
            Err(SourceError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        assert!(source.read().is_err());
    }

    #[test]
    fn inline_source_returns_its_text() {
        let source = InlineSource::new("bundled", "{}");
        assert_eq!(source.read().unwrap(), "{}");
        assert_eq!(source.describe(), "inline:bundled");
    }
}
