// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! SQL execution over catalog tables.

use datafusion::prelude::{DataFrame, SessionContext};
use tarn_catalog::CatalogStore;
use tracing::debug;

use crate::error::{LakeError, Result};
use crate::rewrite::rewrite_sql;

/// Build an engine session that resolves quoted file paths as tables,
/// which is how the rewriter's output refers to stored files.
pub fn lake_context() -> SessionContext {
    SessionContext::new().enable_url_table()
}

/// A SQL query over logical table names.
///
/// No parsing happens at construction; the query is rewritten against the
/// store's catalog and validated by the engine when executed.
///
/// # Example
///
/// ```no_run
/// use tarn::{CatalogStore, LakeQuery};
///
/// # async fn example() -> tarn::Result<()> {
/// let store = CatalogStore::new("my-datalake");
/// let df = LakeQuery::new("SELECT region, SUM(amount) FROM sales GROUP BY region")
///     .execute(&store)
///     .await?;
/// let batches = df.collect().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LakeQuery {
    sql: String,
}

impl LakeQuery {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
        }
    }

    /// The original query text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Rewrite table references against the store's catalog and execute.
    ///
    /// Returns the engine's lazy relation handle: nothing runs until the
    /// caller collects, and the handle can be cloned for repeated
    /// consumption. Engine parse and execution errors surface verbatim.
    pub async fn execute(&self, store: &CatalogStore) -> Result<DataFrame> {
        self.execute_with_context(store, lake_context()).await
    }

    /// Execute against a caller-provided session, e.g. one shared across
    /// queries or carrying extra registered tables.
    pub async fn execute_with_context(
        &self,
        store: &CatalogStore,
        ctx: SessionContext,
    ) -> Result<DataFrame> {
        let catalog = store.load().map_err(|e| LakeError::Catalog {
            source: e,
            location: snafu::Location::new(file!(), line!(), column!()),
        })?;
        let rewritten = rewrite_sql(&self.sql, store, &catalog);
        debug!(%rewritten, "executing SQL");

        ctx.sql(&rewritten).await.map_err(|e| LakeError::Plan {
            message: format!("SQL execution error: {}", e),
            location: snafu::Location::new(file!(), line!(), column!()),
        })
    }

    /// Render the logical and physical plans for the rewritten query.
    pub async fn explain(&self, store: &CatalogStore) -> Result<String> {
        let ctx = lake_context();
        let df = self.execute_with_context(store, ctx.clone()).await?;

        let logical_plan = df.logical_plan();
        let physical_plan = ctx
            .state()
            .create_physical_plan(logical_plan)
            .await
            .map_err(|e| LakeError::Plan {
                message: format!("failed to create physical plan: {}", e),
                location: snafu::Location::new(file!(), line!(), column!()),
            })?;
        let physical = datafusion::physical_plan::displayable(physical_plan.as_ref())
            .indent(true)
            .to_string();

        Ok(format!(
            "== Logical Plan ==\n{}\n\n== Physical Plan ==\n{}",
            logical_plan.display_indent(),
            physical,
        ))
    }
}
