// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Error type for lake operations.

use snafu::{Location, Snafu};
use tarn_catalog::CatalogError;

/// Errors surfaced by registration, inference, and query execution.
///
/// Engine errors are carried verbatim in the message of
/// [`LakeError::Plan`]; this layer does not interpret or translate them.
#[derive(Debug, Snafu)]
pub enum LakeError {
    /// Catalog-layer failure: duplicate name, unknown table, unsupported
    /// format, or a bad catalog document.
    #[snafu(display("{source}, {location}"))]
    Catalog {
        source: CatalogError,
        location: Location,
    },

    /// Managed-storage filesystem failure.
    #[snafu(display("{message}, {location}"))]
    Io { message: String, location: Location },

    /// Planning or execution failure reported by the query engine.
    #[snafu(display("{message}, {location}"))]
    Plan { message: String, location: Location },
}

pub type Result<T> = std::result::Result<T, LakeError>;
