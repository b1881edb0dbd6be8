//! f2f - fridge2fork from the command line
//!
//! Suggests recipes from the ingredients in your pantry, honoring dietary
//! preferences. State is kept in a SQLite key-value database in the data
//! folder.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use f2f_common::config::{DataFolderInitializer, DataFolderResolver, LoggingConfig, TomlConfig};
use f2f_common::kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
use f2f_common::Catalog;
use f2f_cli::{App, Command};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for f2f
#[derive(Parser, Debug)]
#[command(name = "f2f")]
#[command(about = "Recipe suggestions from your pantry")]
#[command(version)]
struct Args {
    /// Folder holding the fridge2fork database (overrides F2F_DATA_FOLDER)
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep state in memory only (nothing is saved)
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref());

    init_tracing(&config.logging)?;
    debug!(
        "f2f v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let kv: Arc<dyn KeyValueStore> = if args.ephemeral {
        info!("Running with in-memory storage");
        Arc::new(MemoryKvStore::new())
    } else {
        let data_folder =
            DataFolderResolver::new(args.data_folder.clone(), config.clone()).resolve();
        let initializer = DataFolderInitializer::new(data_folder);
        initializer
            .ensure_directory_exists()
            .context("Failed to create data folder")?;

        let db_path = initializer.database_path();
        debug!("Database path: {}", db_path.display());
        Arc::new(
            SqliteKvStore::open(&db_path)
                .await
                .context("Failed to open database")?,
        )
    };

    let mut app = App::open(kv, Catalog::builtin()).await;
    let outcome = app.execute(args.command).await;
    app.shutdown().await;

    let output = outcome?;
    println!("{}", output);
    Ok(())
}

/// Log to stderr, or to the configured file; `RUST_LOG` overrides the level
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let default_directives = format!(
        "warn,f2f_common={0},f2f_cli={0},f2f={0}",
        logging.level
    );
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
