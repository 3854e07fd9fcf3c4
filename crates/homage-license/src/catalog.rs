//! The [`LicenseCatalog`]: a case-insensitive table of license templates.
//!
//! A catalog is created once per embedding session, seeded with the
//! built-in templates, and may then be extended with custom entries. It is
//! never shrunk. Entries are stored behind `Arc` so lookups hand out the
//! stored value instead of copying it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::builtin::{
    DefaultStrings, Seed, StringResolver, NONE_KEY, NONE_SEED, SEEDS, UNRECOGNISED_KEY,
    UNRECOGNISED_SEED,
};
use crate::entry::LicenseEntry;
use crate::error::{LicenseError, Result};
use crate::legacy::translate_legacy_code;
use crate::rich_text::RichText;

#[derive(Debug)]
struct StoredLicense {
    /// Key as it was added, case preserved.
    key: String,
    entry: Arc<LicenseEntry>,
}

struct Table {
    licenses: HashMap<String, StoredLicense>,
    /// Current entries of the two sentinel keys, kept in step with
    /// `licenses` by [`Table::insert`].
    none: Arc<LicenseEntry>,
    unrecognised: Arc<LicenseEntry>,
}

impl Table {
    fn new(none: Arc<LicenseEntry>, unrecognised: Arc<LicenseEntry>) -> Self {
        let mut table = Self {
            licenses: HashMap::new(),
            none: Arc::clone(&none),
            unrecognised: Arc::clone(&unrecognised),
        };
        table.insert(UNRECOGNISED_KEY, unrecognised);
        table.insert(NONE_KEY, none);
        table
    }

    /// Returns whether an entry was replaced.
    fn insert(&mut self, key: &str, entry: Arc<LicenseEntry>) -> bool {
        let folded = fold_key(key);
        if folded == NONE_KEY {
            self.none = Arc::clone(&entry);
        } else if folded == UNRECOGNISED_KEY {
            self.unrecognised = Arc::clone(&entry);
        }
        self.licenses
            .insert(
                folded,
                StoredLicense {
                    key: key.to_string(),
                    entry,
                },
            )
            .is_some()
    }

    fn get(&self, key: &str) -> Option<&StoredLicense> {
        self.licenses.get(key)
    }
}

fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

fn string_for(strings: &dyn StringResolver, id: &str) -> Result<String> {
    strings
        .string_for(id)
        .ok_or_else(|| LicenseError::MissingString { id: id.to_string() })
}

fn seed_entry(strings: &dyn StringResolver, seed: &Seed) -> Result<LicenseEntry> {
    Ok(LicenseEntry::new(
        string_for(strings, seed.name_id)?,
        string_for(strings, seed.url_id)?,
        RichText::from_html(&string_for(strings, seed.description_id)?),
    ))
}

/// A table of license templates keyed by case-insensitive codes.
///
/// All operations take `&self`; the table sits behind a `RwLock` so a
/// catalog can be shared between the code that extends it and the library
/// list that resolves against it.
pub struct LicenseCatalog {
    table: RwLock<Table>,
    strings: Box<dyn StringResolver>,
}

impl LicenseCatalog {
    /// Create a catalog seeded with the built-in templates, resolving
    /// their texts through `strings`.
    pub fn new(strings: impl StringResolver + 'static) -> Result<Self> {
        let strings: Box<dyn StringResolver> = Box::new(strings);
        let none = Arc::new(seed_entry(strings.as_ref(), &NONE_SEED)?);
        let unrecognised = Arc::new(seed_entry(strings.as_ref(), &UNRECOGNISED_SEED)?);
        let catalog = Self {
            table: RwLock::new(Table::new(none, unrecognised)),
            strings,
        };
        for seed in SEEDS {
            catalog.add_license_from_strings(
                seed.key,
                seed.name_id,
                seed.url_id,
                seed.description_id,
            )?;
        }
        Ok(catalog)
    }

    /// Create a catalog using [`DefaultStrings`].
    pub fn with_default_strings() -> Result<Self> {
        Self::new(DefaultStrings)
    }

    /// Insert or overwrite the entry for `key`.
    ///
    /// Keys collide case-insensitively: adding `MIT` replaces `mit`, and the
    /// stored key takes the new spelling.
    pub fn add_license(
        &self,
        key: &str,
        name: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<RichText>,
    ) -> Result<()> {
        if key.is_empty() {
            return Err(LicenseError::EmptyKey);
        }
        let entry = Arc::new(LicenseEntry::new(name, url, description.into()));

        let mut table = self
            .table
            .write()
            .map_err(|e| LicenseError::Poisoned(e.to_string()))?;
        let replaced = table.insert(key, entry);
        debug!(key, replaced, "license added");
        Ok(())
    }

    /// Insert or overwrite `key` with texts looked up through the catalog's
    /// [`StringResolver`]. The description is parsed as HTML.
    pub fn add_license_from_strings(
        &self,
        key: &str,
        name_id: &str,
        url_id: &str,
        description_id: &str,
    ) -> Result<()> {
        let name = self.string(name_id)?;
        let url = self.string(url_id)?;
        let description = RichText::from_html(&self.string(description_id)?);
        self.add_license(key, name, url, description)
    }

    fn string(&self, id: &str) -> Result<String> {
        string_for(self.strings.as_ref(), id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|e| LicenseError::Poisoned(e.to_string()))
    }

    /// Case-insensitive lookup. Returns the stored entry, not a copy.
    pub fn lookup(&self, key: &str) -> Result<Option<Arc<LicenseEntry>>> {
        let table = self.read()?;
        Ok(table.get(&fold_key(key)).map(|s| Arc::clone(&s.entry)))
    }

    /// Resolve a library's declared license code to an entry.
    ///
    /// 1. An absent or empty code resolves to the `none` sentinel.
    /// 2. A code matching a key (ignoring case) resolves to that entry.
    /// 3. A legacy code resolves to the entry of its canonical key.
    /// 4. Anything else resolves to the `unrecognised` sentinel.
    ///
    /// The whole resolution runs under one read lock, so a concurrent
    /// `add_license` is observed either entirely or not at all.
    pub fn resolve(&self, code: Option<&str>) -> Result<Arc<LicenseEntry>> {
        let table = self.read()?;
        let found = match code.filter(|c| !c.is_empty()) {
            None => Arc::clone(&table.none),
            Some(code) => match table.get(&fold_key(code)) {
                Some(stored) => Arc::clone(&stored.entry),
                None => match translate_legacy_code(code).and_then(|key| table.get(key)) {
                    Some(stored) => {
                        debug!(code, canonical = %stored.key, "resolved legacy license code");
                        Arc::clone(&stored.entry)
                    }
                    None => {
                        debug!(code, "unrecognised license code");
                        Arc::clone(&table.unrecognised)
                    }
                },
            },
        };
        Ok(found)
    }

    /// The entry used for libraries without a license code.
    pub fn none(&self) -> Result<Arc<LicenseEntry>> {
        Ok(Arc::clone(&self.read()?.none))
    }

    /// The entry used for license codes that match nothing.
    pub fn unrecognised(&self) -> Result<Arc<LicenseEntry>> {
        Ok(Arc::clone(&self.read()?.unrecognised))
    }

    /// All keys in their stored spelling, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let table = self.read()?;
        let mut keys: Vec<String> = table.licenses.values().map(|s| s.key.clone()).collect();
        keys.sort();
        Ok(keys)
    }

    /// All `(key, entry)` pairs, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, Arc<LicenseEntry>)>> {
        let table = self.read()?;
        let mut entries: Vec<(String, Arc<LicenseEntry>)> = table
            .licenses
            .values()
            .map(|s| (s.key.clone(), Arc::clone(&s.entry)))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(entries)
    }

    /// Number of entries, sentinels included.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.licenses.len())
    }

    /// Always `false` once constructed; provided for API symmetry.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.licenses.is_empty())
    }
}

impl fmt::Debug for LicenseCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("LicenseCatalog");
        match self.table.read() {
            Ok(table) => d.field("licenses", &table.licenses.len()),
            Err(_) => d.field("licenses", &"<poisoned>"),
        };
        d.finish_non_exhaustive()
    }
}
