// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Built-in [`FormatReader`] implementations for the supported formats.
//!
//! - [`CsvReader`] — opens CSV files with the engine's schema-inferring reader.
//! - [`ParquetReader`] — opens Parquet files using the engine's built-in support.

use std::sync::Arc;

use async_trait::async_trait;
use datafusion::prelude::{CsvReadOptions, DataFrame, ParquetReadOptions, SessionContext};
use tarn_catalog::DataFormat;

use crate::error::{LakeError, Result};

/// Opens files of a specific data format as lazy engine relations.
///
/// One implementation per storage format. Readers never materialize data:
/// they hand back a [`DataFrame`] whose schema is available without a
/// scan, which is what schema inference relies on.
#[async_trait]
pub trait FormatReader: Send + Sync {
    /// Human-readable name of this reader (e.g., "csv", "parquet").
    fn name(&self) -> &str;

    /// The data format(s) this reader can handle.
    fn supported_formats(&self) -> &[DataFormat];

    /// Open the file at `path` as a lazy relation.
    async fn open(&self, ctx: &SessionContext, path: &str) -> Result<DataFrame>;
}

/// Reads CSV files; column types are inferred by the engine.
pub struct CsvReader;

#[async_trait]
impl FormatReader for CsvReader {
    fn name(&self) -> &str {
        "csv"
    }

    fn supported_formats(&self) -> &[DataFormat] {
        &[DataFormat::Csv]
    }

    async fn open(&self, ctx: &SessionContext, path: &str) -> Result<DataFrame> {
        ctx.read_csv(path, CsvReadOptions::new())
            .await
            .map_err(|e| LakeError::Plan {
                message: format!("failed to open CSV file '{}': {}", path, e),
                location: snafu::Location::new(file!(), line!(), column!()),
            })
    }
}

/// Reads Parquet files using the engine's built-in support.
pub struct ParquetReader;

#[async_trait]
impl FormatReader for ParquetReader {
    fn name(&self) -> &str {
        "parquet"
    }

    fn supported_formats(&self) -> &[DataFormat] {
        &[DataFormat::Parquet]
    }

    async fn open(&self, ctx: &SessionContext, path: &str) -> Result<DataFrame> {
        ctx.read_parquet(path, ParquetReadOptions::default())
            .await
            .map_err(|e| LakeError::Plan {
                message: format!("failed to open Parquet file '{}': {}", path, e),
                location: snafu::Location::new(file!(), line!(), column!()),
            })
    }
}

/// Returns the default set of format readers.
pub fn default_readers() -> Vec<Arc<dyn FormatReader>> {
    vec![Arc::new(CsvReader), Arc::new(ParquetReader)]
}

/// Find a reader that supports the given data format.
pub fn reader_for(
    readers: &[Arc<dyn FormatReader>],
    format: DataFormat,
) -> Option<&dyn FormatReader> {
    readers
        .iter()
        .find(|r| r.supported_formats().contains(&format))
        .map(|r| r.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_readers_cover_both_formats() {
        let readers = default_readers();
        assert_eq!(reader_for(&readers, DataFormat::Csv).unwrap().name(), "csv");
        assert_eq!(
            reader_for(&readers, DataFormat::Parquet).unwrap().name(),
            "parquet"
        );
    }
}
