// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: Copyright The Tarn Authors

//! Command-line interface: register, list, inspect, and query tables.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tarn::{CatalogStore, GitSnapshot, LakeQuery, Registrar};
use tracing_subscriber::EnvFilter;

/// How many tables `ls` prints before pointing at the catalog document.
const LIST_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "tarn", version, about = "Local data lake manager")]
struct Cli {
    /// Managed storage root directory.
    #[arg(long, default_value = "my-datalake", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a data file under a logical table name.
    Add {
        /// Logical table name used in queries.
        name: String,
        /// Source file (.csv or .parquet).
        file: PathBuf,
        /// Optional human-readable description file.
        #[arg(long)]
        description: Option<PathBuf>,
        /// Skip the git snapshot of the storage root.
        #[arg(long)]
        no_snapshot: bool,
    },
    /// List registered tables.
    Ls,
    /// Print the stored metadata of one table.
    Meta { name: String },
    /// Execute a SQL query over logical table names.
    Query {
        sql: String,
        /// Print the query plans instead of executing.
        #[arg(long)]
        explain: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = CatalogStore::new(&cli.root);

    match cli.command {
        Command::Add {
            name,
            file,
            description,
            no_snapshot,
        } => {
            let mut registrar = Registrar::new(store);
            if !no_snapshot {
                registrar = registrar.with_snapshot(Arc::new(GitSnapshot));
            }
            let entry = registrar
                .add_table(&name, &file, description.as_deref())
                .await?;
            println!("Added table '{}' as index {}", name, entry.index);
            println!("  File: {}", entry.file);
            if let Some(desc) = &entry.description_file {
                println!("  Description: {}", desc);
            }
        }
        Command::Ls => {
            let catalog = store.load()?;
            println!("{:<10} {}", "Index", "Table Name");
            println!("{}", "-".repeat(30));
            for (name, entry) in catalog.iter().take(LIST_LIMIT) {
                println!("{:<10} {}", entry.index, name);
            }
            if catalog.len() > LIST_LIMIT {
                println!(
                    "... {} more; see metadata/catalog.json for the full catalog",
                    catalog.len() - LIST_LIMIT
                );
            }
        }
        Command::Meta { name } => {
            let entry = store.get_meta(&name)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        Command::Query { sql, explain } => {
            let query = LakeQuery::new(&sql);
            if explain {
                println!("{}", query.explain(&store).await?);
            } else {
                let df = query.execute(&store).await?;
                df.show().await?;
            }
        }
    }
    Ok(())
}
