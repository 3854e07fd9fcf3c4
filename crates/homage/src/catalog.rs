//! The [`LibraryCatalog`]: refresh from manifest sources and publish.
//!
//! A refresh reads every source in order, parses each manifest, resolves
//! every record's license and icon, and then swaps the published snapshot
//! in one write. Readers holding an earlier snapshot keep it unchanged.
//!
//! A source that cannot be read or parsed is logged and skipped; it never
//! aborts the refresh.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use homage_license::LicenseCatalog;
use tracing::{debug, info, warn};

use crate::config::{CustomLicense, EmptyRefreshPolicy, HomageConfig};
use crate::error::{CatalogError, Result};
use crate::icon::{resolve_icon, IconResolver, NoIcons};
use crate::library::Library;
use crate::source::{FileSource, ManifestSource};

/// Whether anything has been published yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogState {
    /// No non-empty refresh has succeeded.
    Uninitialized,
    /// A list has been published.
    Published,
}

/// What a refresh did to the published list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new list with this many libraries replaced the old one.
    Published { libraries: usize },
    /// Nothing was found and the previous list was kept.
    Preserved,
    /// Nothing was found and an empty list was published.
    Cleared,
}

/// Summary of one refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshReport {
    /// Sources read and parsed successfully.
    pub sources_read: usize,
    /// Sources skipped because reading or parsing failed.
    pub sources_skipped: usize,
    pub outcome: RefreshOutcome,
}

struct Snapshot {
    libraries: Arc<[Library]>,
    state: CatalogState,
}

/// The published list of resolved libraries.
pub struct LibraryCatalog {
    licenses: Arc<LicenseCatalog>,
    sources: Vec<Arc<dyn ManifestSource>>,
    icons: Arc<dyn IconResolver>,
    empty_refresh: EmptyRefreshPolicy,
    published: RwLock<Snapshot>,
    /// Serializes refreshes so two publishes never interleave. Guards no
    /// data, so a refresh that panicked leaves nothing to recover.
    refresh_lock: Mutex<()>,
}

impl LibraryCatalog {
    pub fn builder(licenses: Arc<LicenseCatalog>) -> LibraryCatalogBuilder {
        LibraryCatalogBuilder::new(licenses)
    }

    /// Build a catalog over `sources` with default settings.
    ///
    /// Fails with [`CatalogError::Configuration`] when `sources` is empty.
    pub fn new(
        licenses: Arc<LicenseCatalog>,
        sources: Vec<Arc<dyn ManifestSource>>,
    ) -> Result<Self> {
        LibraryCatalogBuilder {
            sources,
            ..LibraryCatalogBuilder::new(licenses)
        }
        .build()
    }

    /// The license catalog records are resolved against.
    pub fn licenses(&self) -> &Arc<LicenseCatalog> {
        &self.licenses
    }

    pub fn sources(&self) -> &[Arc<dyn ManifestSource>] {
        &self.sources
    }

    pub fn empty_refresh(&self) -> EmptyRefreshPolicy {
        self.empty_refresh
    }

    /// Refresh from the configured sources.
    pub fn refresh(&self) -> Result<RefreshReport> {
        self.refresh_from(&self.sources)
    }

    /// Refresh from an explicit list of sources, in order.
    pub fn refresh_from(&self, sources: &[Arc<dyn ManifestSource>]) -> Result<RefreshReport> {
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = Vec::new();
        let mut sources_read = 0;
        let mut sources_skipped = 0;

        for source in sources {
            let descriptor = source.describe();
            let text = match source.read() {
                Ok(text) => text,
                Err(e) => {
                    warn!(source = %descriptor, error = %e, "skipping unreadable manifest source");
                    sources_skipped += 1;
                    continue;
                }
            };
            match homage_manifest::parse(&text) {
                Ok(mut parsed) => {
                    debug!(source = %descriptor, libraries = parsed.len(), "parsed manifest");
                    sources_read += 1;
                    records.append(&mut parsed);
                }
                Err(e) => {
                    warn!(source = %descriptor, error = %e, "skipping malformed manifest");
                    sources_skipped += 1;
                }
            }
        }

        if records.is_empty() {
            let outcome = match self.empty_refresh {
                EmptyRefreshPolicy::Preserve => {
                    warn!("no libraries found; keeping the previous list");
                    RefreshOutcome::Preserved
                }
                EmptyRefreshPolicy::Clear => {
                    warn!("no libraries found; clearing the list");
                    let mut published = self
                        .published
                        .write()
                        .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
                    published.libraries = Arc::from(Vec::new());
                    RefreshOutcome::Cleared
                }
            };
            return Ok(RefreshReport {
                sources_read,
                sources_skipped,
                outcome,
            });
        }

        let libraries = records
            .into_iter()
            .map(|record| -> Result<Library> {
                let license = self.licenses.resolve(record.license_code.as_deref())?;
                let icon = resolve_icon(record.icon.as_deref(), self.icons.as_ref());
                Ok(Library::resolved(record, license, icon))
            })
            .collect::<Result<Vec<_>>>()?;
        let count = libraries.len();

        {
            let mut published = self
                .published
                .write()
                .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
            *published = Snapshot {
                libraries: Arc::from(libraries),
                state: CatalogState::Published,
            };
        }
        info!(libraries = count, sources = sources_read, "published library list");

        Ok(RefreshReport {
            sources_read,
            sources_skipped,
            outcome: RefreshOutcome::Published { libraries: count },
        })
    }

    /// The current snapshot. Empty before the first successful refresh.
    pub fn libraries(&self) -> Result<Arc<[Library]>> {
        let published = self
            .published
            .read()
            .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
        Ok(Arc::clone(&published.libraries))
    }

    pub fn state(&self) -> Result<CatalogState> {
        let published = self
            .published
            .read()
            .map_err(|e| CatalogError::Poisoned(e.to_string()))?;
        Ok(published.state)
    }
}

impl fmt::Debug for LibraryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryCatalog")
            .field("licenses", &self.licenses)
            .field(
                "sources",
                &self.sources.iter().map(|s| s.describe()).collect::<Vec<_>>(),
            )
            .field("empty_refresh", &self.empty_refresh)
            .finish_non_exhaustive()
    }
}

/// Builder for [`LibraryCatalog`].
pub struct LibraryCatalogBuilder {
    licenses: Arc<LicenseCatalog>,
    sources: Vec<Arc<dyn ManifestSource>>,
    icons: Arc<dyn IconResolver>,
    empty_refresh: EmptyRefreshPolicy,
    custom_licenses: Vec<CustomLicense>,
}

impl LibraryCatalogBuilder {
    pub fn new(licenses: Arc<LicenseCatalog>) -> Self {
        Self {
            licenses,
            sources: Vec::new(),
            icons: Arc::new(NoIcons),
            empty_refresh: EmptyRefreshPolicy::default(),
            custom_licenses: Vec::new(),
        }
    }

    /// Append a manifest source.
    pub fn source(mut self, source: impl ManifestSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Append an already shared manifest source.
    pub fn shared_source(mut self, source: Arc<dyn ManifestSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn icons(mut self, icons: impl IconResolver + 'static) -> Self {
        self.icons = Arc::new(icons);
        self
    }

    pub fn empty_refresh(mut self, policy: EmptyRefreshPolicy) -> Self {
        self.empty_refresh = policy;
        self
    }

    /// Take the refresh policy, manifest files and custom licenses from
    /// `config`. The licenses are added to the license catalog by
    /// [`build`](Self::build).
    pub fn config(mut self, config: &HomageConfig) -> Self {
        self.empty_refresh = config.empty_refresh;
        for path in &config.manifests {
            self.sources.push(Arc::new(FileSource::new(path.clone())));
        }
        self.custom_licenses.extend(config.licenses.iter().cloned());
        self
    }

    pub fn build(self) -> Result<LibraryCatalog> {
        if self.sources.is_empty() {
            return Err(CatalogError::Configuration(
                "no manifest sources configured".into(),
            ));
        }
        for custom in &self.custom_licenses {
            custom.add_to(&self.licenses)?;
        }
        Ok(LibraryCatalog {
            licenses: self.licenses,
            sources: self.sources,
            icons: self.icons,
            empty_refresh: self.empty_refresh,
            published: RwLock::new(Snapshot {
                libraries: Arc::from(Vec::new()),
                state: CatalogState::Uninitialized,
            }),
            refresh_lock: Mutex::new(()),
        })
    }
}
