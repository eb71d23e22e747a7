// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Logical-name → file-path rewriting of user SQL.
//!
//! The rewriter is a lexical approximation, not a SQL parser: it scans the
//! query for whole-word tokens (alphanumeric/underscore runs) and replaces
//! the ones naming catalog tables with quoted file paths the engine
//! resolves directly. It does not distinguish identifiers from string
//! literals or comments.
//!
//! Matching is whole-token only, so a table name that is a substring of a
//! longer identifier (`sales` inside `sales_2024`) is never replaced. The
//! output is spliced in a single left-to-right pass over the original
//! string's token spans; substituted text is never re-scanned, so a path
//! segment that happens to equal another table's name cannot trigger a
//! second substitution.

use std::collections::HashSet;
use std::path::Path;

use tarn_catalog::{Catalog, CatalogStore};
use tracing::debug;

/// Byte spans of whole-word tokens: maximal runs of alphanumeric or
/// underscore characters, bounded by non-word characters or string ends.
fn word_spans(sql: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in sql.char_indices() {
        let word = ch.is_alphanumeric() || ch == '_';
        match (word, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, sql.len()));
    }
    spans
}

/// Forward-slash form of a path, as the engine expects in quoted literals.
fn posix_form(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Replace every whole-token occurrence of a catalog table name in `sql`
/// with the entry's file path, resolved against the store root and wrapped
/// in single quotes.
///
/// A query referencing no catalog name is returned byte-identical.
pub fn rewrite_sql(sql: &str, store: &CatalogStore, catalog: &Catalog) -> String {
    let spans = word_spans(sql);

    // Token set ∩ name set, O(tokens + names).
    let matched: HashSet<&str> = spans
        .iter()
        .map(|&(start, end)| &sql[start..end])
        .filter(|token| catalog.contains_key(*token))
        .collect();
    if matched.is_empty() {
        return sql.to_string();
    }
    debug!(?matched, "rewriting table references");

    let mut out = String::with_capacity(sql.len() + matched.len() * 16);
    let mut cursor = 0;
    for &(start, end) in &spans {
        let token = &sql[start..end];
        if let Some(entry) = catalog.get(token) {
            out.push_str(&sql[cursor..start]);
            out.push('\'');
            out.push_str(&posix_form(&store.resolve(entry)));
            out.push('\'');
            cursor = end;
        }
    }
    out.push_str(&sql[cursor..]);
    out
}
