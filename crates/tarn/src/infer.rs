// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Schema inference through the engine's lazy readers.

use std::path::Path;

use datafusion::prelude::SessionContext;
use tarn_catalog::{arrow_to_type_name, CatalogError, DataFormat, TableSchema};

use crate::error::{LakeError, Result};
use crate::readers::{default_readers, reader_for};

/// Infer the schema of a data file without materializing it.
///
/// Opens the file lazily in a fresh engine session and reads column names
/// and types from the relation's schema, in file order. Fails with an
/// unsupported-format error when no reader handles `format`.
pub async fn infer_schema(path: &Path, format: DataFormat) -> Result<TableSchema> {
    let readers = default_readers();
    let reader = reader_for(&readers, format).ok_or_else(|| LakeError::Catalog {
        source: CatalogError::UnsupportedFormat(format!("no reader for format '{}'", format)),
        location: snafu::Location::new(file!(), line!(), column!()),
    })?;

    let ctx = SessionContext::new();
    let path_text = path.to_string_lossy();
    let df = reader.open(&ctx, path_text.as_ref()).await?;

    Ok(df
        .schema()
        .fields()
        .iter()
        .map(|field| (field.name().clone(), arrow_to_type_name(field.data_type())))
        .collect())
}
