// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Catalog data model: formats, table entries, and the error taxonomy.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Data format of a stored table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Parquet,
}

impl DataFormat {
    /// Detect the format from a source file's extension.
    ///
    /// Only `.csv` and `.parquet` are recognized (case-insensitive).
    pub fn from_extension(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(CatalogError::UnsupportedFormat(format!(
                "unsupported file type '{}': only .csv and .parquet are supported",
                path.display()
            ))),
        }
    }

    /// Canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Schema of a stored table: column name → type name, in column order.
pub type TableSchema = IndexMap<String, String>;

/// Metadata for one registered table.
///
/// Created once by the registrar and immutable afterwards. `file` and
/// `description_file` are forward-slash paths relative to the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Stable 0-based index assigned at registration time; equals the
    /// catalog's size immediately before insertion and is never reused.
    pub index: u64,
    pub file: String,
    pub description_file: Option<String>,
    pub format: DataFormat,
    pub schema: TableSchema,
}

/// The catalog: logical table name → entry, in registration order.
///
/// Insertion order is authoritative — it defines the index sequence and the
/// serialization order of the catalog document.
pub type Catalog = IndexMap<String, TableEntry>;

/// Errors that can occur during catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// Registering a logical name that already exists.
    DuplicateName(String),
    /// Metadata lookup for an unknown logical name.
    NotFound(String),
    /// File extension or declared format outside {csv, parquet}.
    UnsupportedFormat(String),
    /// The catalog document is not well-formed JSON.
    Parse(String),
    /// Filesystem failure in managed storage.
    Io(std::io::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "table '{}' already exists", name),
            Self::NotFound(name) => write!(f, "table '{}' not found", name),
            Self::UnsupportedFormat(msg) => write!(f, "unsupported format: {}", msg),
            Self::Parse(msg) => write!(f, "catalog document error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DataFormat::from_extension(Path::new("data.csv")).unwrap(),
            DataFormat::Csv
        );
        assert_eq!(
            DataFormat::from_extension(Path::new("exports/Q3.PARQUET")).unwrap(),
            DataFormat::Parquet
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DataFormat::from_extension(Path::new("data.json")).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
        assert!(err.to_string().contains("data.json"));
        assert!(DataFormat::from_extension(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_entry_document_shape() {
        let mut schema = TableSchema::new();
        schema.insert("id".to_string(), "BIGINT".to_string());
        let entry = TableEntry {
            index: 0,
            file: "tables/0.csv".to_string(),
            description_file: None,
            format: DataFormat::Csv,
            schema,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["file"], "tables/0.csv");
        assert!(json["description_file"].is_null());
        assert_eq!(json["format"], "csv");
        assert_eq!(json["schema"]["id"], "BIGINT");
    }

    #[test]
    fn test_entry_round_trip() {
        let mut schema = TableSchema::new();
        schema.insert("id".to_string(), "BIGINT".to_string());
        schema.insert("name".to_string(), "VARCHAR".to_string());
        let entry = TableEntry {
            index: 3,
            file: "tables/3.parquet".to_string(),
            description_file: Some("tables/3.description.md".to_string()),
            format: DataFormat::Parquet,
            schema,
        };

        let text = serde_json::to_string(&entry).unwrap();
        let back: TableEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_catalog_preserves_insertion_order() {
        let mut catalog = Catalog::new();
        for (i, name) in ["zebra", "apple", "mango"].iter().enumerate() {
            catalog.insert(
                name.to_string(),
                TableEntry {
                    index: i as u64,
                    file: format!("tables/{}.csv", i),
                    description_file: None,
                    format: DataFormat::Csv,
                    schema: TableSchema::new(),
                },
            );
        }

        let text = serde_json::to_string(&catalog).unwrap();
        let zebra = text.find("zebra").unwrap();
        let apple = text.find("apple").unwrap();
        let mango = text.find("mango").unwrap();
        assert!(zebra < apple && apple < mango);
    }
}
