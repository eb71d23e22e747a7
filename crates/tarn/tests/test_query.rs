// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Integration tests for query rewriting and execution.

use std::fs;
use std::path::{Path, PathBuf};

use arrow_array::{Int64Array, StringArray};
use datafusion::prelude::{CsvReadOptions, SessionContext};
use tarn::{CatalogStore, LakeQuery, Registrar};
use tempfile::TempDir;

fn write_sales_csv(dir: &Path) -> PathBuf {
    let path = dir.join("sales.csv");
    fs::write(
        &path,
        "id,region,amount\n1,north,10\n2,south,20\n3,north,30\n",
    )
    .unwrap();
    path
}

async fn setup_with_sales() -> (TempDir, CatalogStore) {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::new(dir.path().join("lake"));
    let source = write_sales_csv(dir.path());
    Registrar::new(store.clone())
        .add_table("sales", &source, None)
        .await
        .unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_query_by_logical_name() {
    let (_dir, store) = setup_with_sales().await;

    let df = LakeQuery::new("SELECT region, amount FROM sales WHERE amount > 15 ORDER BY amount")
        .execute(&store)
        .await
        .unwrap();
    let batches = df.collect().await.unwrap();

    let regions: Vec<&str> = batches
        .iter()
        .flat_map(|batch| {
            batch
                .column_by_name("region")
                .unwrap()
                .as_any()
                .downcast_ref::<StringArray>()
                .unwrap()
                .iter()
                .map(|v| v.unwrap())
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(regions, vec!["south", "north"]);
}

#[tokio::test]
async fn test_rewritten_query_matches_direct_file_read() {
    let (_dir, store) = setup_with_sales().await;

    let rewritten = LakeQuery::new("SELECT * FROM sales")
        .execute(&store)
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    let stored = store.resolve(&store.get_meta("sales").unwrap());
    let direct = SessionContext::new()
        .read_csv(stored.to_string_lossy().into_owned(), CsvReadOptions::new())
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    assert_eq!(rewritten, direct);
}

#[tokio::test]
async fn test_longer_identifier_is_not_rewritten() {
    let (_dir, store) = setup_with_sales().await;

    // Only `sales` is registered; `sales_region` must reach the engine
    // untouched and fail as an unknown table.
    let err = LakeQuery::new("SELECT * FROM sales_region")
        .execute(&store)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("sales_region"));
}

#[tokio::test]
async fn test_aggregation_over_logical_name() {
    let (_dir, store) = setup_with_sales().await;

    let df = LakeQuery::new("SELECT COUNT(*) AS cnt, SUM(amount) AS total FROM sales")
        .execute(&store)
        .await
        .unwrap();
    let batches = df.collect().await.unwrap();

    let batch = &batches[0];
    let cnt = batch
        .column_by_name("cnt")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
        .value(0);
    assert_eq!(cnt, 3);
    let total = batch
        .column_by_name("total")
        .unwrap()
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
        .value(0);
    assert_eq!(total, 60);
}

#[tokio::test]
async fn test_handle_supports_repeated_consumption() {
    let (_dir, store) = setup_with_sales().await;

    let df = LakeQuery::new("SELECT id FROM sales ORDER BY id")
        .execute(&store)
        .await
        .unwrap();
    let first = df.clone().collect().await.unwrap();
    let second = df.collect().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_sql_surfaces_engine_error() {
    let (_dir, store) = setup_with_sales().await;

    let result = LakeQuery::new("NOT VALID SQL").execute(&store).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_explain_renders_both_plans() {
    let (_dir, store) = setup_with_sales().await;

    let plan = LakeQuery::new("SELECT id FROM sales WHERE amount > 15")
        .explain(&store)
        .await
        .unwrap();
    assert!(plan.contains("Logical Plan"));
    assert!(plan.contains("Physical Plan"));
}

#[tokio::test]
async fn test_sql_text_accessor() {
    let query = LakeQuery::new("SELECT 1");
    assert_eq!(query.sql(), "SELECT 1");
}
