// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! tarn — a lightweight local data lake manager.
//!
//! Tracks a catalog of tabular files (CSV/Parquet), copies them into a
//! managed directory, infers their schema through the embedded query
//! engine, and rewrites logical table names in user SQL into file-path
//! literals before execution:
//!
//! - [`Registrar`] — add tables to the catalog
//! - [`LakeQuery`] — rewrite + execute SQL, returning a lazy relation
//! - [`infer_schema`] — column names/types without materializing data
//! - [`Snapshot`] / [`GitSnapshot`] — optional version-control snapshots

pub mod error;
pub mod infer;
pub mod query;
pub mod readers;
pub mod registrar;
pub mod rewrite;
pub mod snapshot;

pub use error::{LakeError, Result};
pub use infer::infer_schema;
pub use query::{lake_context, LakeQuery};
pub use readers::{default_readers, reader_for, CsvReader, FormatReader, ParquetReader};
pub use registrar::Registrar;
pub use rewrite::rewrite_sql;
pub use snapshot::{GitSnapshot, Snapshot};

// Catalog exports, so most callers need only this crate.
pub use tarn_catalog::{
    Catalog, CatalogError, CatalogStore, DataFormat, TableEntry, TableSchema,
};
