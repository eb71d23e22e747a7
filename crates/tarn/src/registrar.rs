// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Table registration: copy into managed storage, infer, persist.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tarn_catalog::{CatalogError, CatalogStore, DataFormat, TableEntry};
use tracing::warn;

use crate::error::{LakeError, Result};
use crate::infer::infer_schema;
use crate::snapshot::Snapshot;

/// Registers new tables into a [`CatalogStore`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use tarn::{CatalogStore, Registrar};
///
/// # async fn example() -> tarn::Result<()> {
/// let registrar = Registrar::new(CatalogStore::new("my-datalake"));
/// let entry = registrar
///     .add_table("sales", Path::new("exports/sales.csv"), None)
///     .await?;
/// println!("registered as index {}", entry.index);
/// # Ok(())
/// # }
/// ```
pub struct Registrar {
    store: CatalogStore,
    snapshot: Option<Arc<dyn Snapshot>>,
}

impl Registrar {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store,
            snapshot: None,
        }
    }

    /// Attach a snapshot collaborator, invoked after each registration.
    pub fn with_snapshot(mut self, snapshot: Arc<dyn Snapshot>) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Register `source` under `logical_name`: copy it into managed
    /// storage as `tables/<index>.<ext>`, infer its schema from the copy,
    /// and persist the new catalog entry.
    ///
    /// Validation failures (duplicate name, unsupported extension) abort
    /// before any side effect. There is no rollback on later failure: if
    /// inference fails after the copy, the copied file remains orphaned.
    pub async fn add_table(
        &self,
        logical_name: &str,
        source: &Path,
        description: Option<&Path>,
    ) -> Result<TableEntry> {
        let mut catalog = self.store.load().map_err(|e| LakeError::Catalog {
            source: e,
            location: snafu::Location::new(file!(), line!(), column!()),
        })?;

        if catalog.contains_key(logical_name) {
            return Err(LakeError::Catalog {
                source: CatalogError::DuplicateName(logical_name.to_string()),
                location: snafu::Location::new(file!(), line!(), column!()),
            });
        }
        let format = DataFormat::from_extension(source).map_err(|e| LakeError::Catalog {
            source: e,
            location: snafu::Location::new(file!(), line!(), column!()),
        })?;

        // Index = catalog size before insertion; never reused.
        let index = catalog.len() as u64;
        let file = format!("tables/{}.{}", index, format.extension());
        let destination = self.store.root().join(&file);
        fs::copy(source, &destination).map_err(|e| LakeError::Io {
            message: format!(
                "failed to copy '{}' into managed storage: {}",
                source.display(),
                e
            ),
            location: snafu::Location::new(file!(), line!(), column!()),
        })?;

        let description_file = match description {
            Some(desc_source) => {
                let rel = format!("tables/{}.description.md", index);
                fs::copy(desc_source, self.store.root().join(&rel)).map_err(|e| {
                    LakeError::Io {
                        message: format!(
                            "failed to copy description '{}': {}",
                            desc_source.display(),
                            e
                        ),
                        location: snafu::Location::new(file!(), line!(), column!()),
                    }
                })?;
                Some(rel)
            }
            None => None,
        };

        // Infer from the copied file so the catalog reflects exactly what
        // is stored.
        let schema = infer_schema(&destination, format).await?;

        let entry = TableEntry {
            index,
            file,
            description_file,
            format,
            schema,
        };
        catalog.insert(logical_name.to_string(), entry.clone());
        self.store.save(&catalog).map_err(|e| LakeError::Catalog {
            source: e,
            location: snafu::Location::new(file!(), line!(), column!()),
        })?;

        if let Some(snapshot) = &self.snapshot {
            let message = format!("Add table: {}", logical_name);
            if let Err(e) = snapshot.commit(self.store.root(), &message) {
                warn!(table = logical_name, "snapshot failed: {}", e);
            }
        }

        Ok(entry)
    }
}
