// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! JSON-document-backed catalog store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError, CatalogResult, TableEntry};

/// Filesystem layout and persistence for one managed storage root.
///
/// Layout under the root: `tables/<index>.<ext>` for copied data files
/// (plus optional `tables/<index>.description.md`), and
/// `metadata/catalog.json` for the catalog document.
///
/// The store owns the document's lifecycle: load fully into memory,
/// mutate, write fully back. There is no partial-write protection and no
/// cross-process locking — callers serialize access externally.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.root.join("tables")
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.metadata_dir().join("catalog.json")
    }

    /// Path of an entry's data file, resolved against the storage root.
    pub fn resolve(&self, entry: &TableEntry) -> PathBuf {
        self.root.join(&entry.file)
    }

    /// Create the directory tree and materialize an empty catalog
    /// document if none exists yet.
    pub fn ensure_structure(&self) -> CatalogResult<()> {
        fs::create_dir_all(self.tables_dir())?;
        fs::create_dir_all(self.metadata_dir())?;
        let path = self.catalog_path();
        if !path.exists() {
            fs::write(&path, "{}")?;
        }
        Ok(())
    }

    /// Load the full catalog into memory.
    ///
    /// A missing document is first materialized as empty. A document that
    /// is not well-formed JSON fails with [`CatalogError::Parse`]; there
    /// is no auto-repair.
    pub fn load(&self) -> CatalogResult<Catalog> {
        self.ensure_structure()?;
        let path = self.catalog_path();
        let text = fs::read_to_string(&path)?;
        serde_json::from_str(&text)
            .map_err(|e| CatalogError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Serialize the full catalog back, overwriting the document.
    ///
    /// The write is not atomic; a crash mid-write can corrupt the
    /// document.
    pub fn save(&self, catalog: &Catalog) -> CatalogResult<()> {
        self.ensure_structure()?;
        let text = serde_json::to_string_pretty(catalog)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        fs::write(self.catalog_path(), text)?;
        Ok(())
    }

    /// Fetch one table's metadata by logical name.
    pub fn get_meta(&self, logical_name: &str) -> CatalogResult<TableEntry> {
        let catalog = self.load()?;
        catalog
            .get(logical_name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(logical_name.to_string()))
    }
}
