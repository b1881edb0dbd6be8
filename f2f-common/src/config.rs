//! Configuration loading and data folder resolution
//!
//! Data folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `F2F_DATA_FOLDER` environment variable
//! 3. `data_folder` key of the TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never stops startup: a warning is
//! logged and compiled defaults are used instead.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "F2F_DATA_FOLDER";

/// File name of the key-value database inside the data folder
pub const DATABASE_FILE: &str = "fridge2fork.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the key-value database
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the config file if present, falling back to defaults
    ///
    /// With no explicit path the platform config location is tried.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Platform config file location (`<config_dir>/fridge2fork/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fridge2fork").join("config.toml"))
}

/// Compiled-in defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        let data_folder = dirs::data_local_dir()
            .map(|d| d.join("fridge2fork"))
            .unwrap_or_else(|| PathBuf::from("./fridge2fork_data"));

        Self {
            data_folder,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Resolves the data folder from the four configuration tiers
#[derive(Debug, Clone, Default)]
pub struct DataFolderResolver {
    cli_arg: Option<PathBuf>,
    toml: TomlConfig,
}

impl DataFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, toml: TomlConfig) -> Self {
        Self { cli_arg, toml }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml.data_folder {
            return path.clone();
        }

        CompiledDefaults::for_current_platform().data_folder
    }
}

/// Creates the data folder and locates files inside it
#[derive(Debug, Clone)]
pub struct DataFolderInitializer {
    folder: PathBuf,
}

impl DataFolderInitializer {
    pub fn new(folder: PathBuf) -> Self {
        Self { folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.folder.exists() {
            std::fs::create_dir_all(&self.folder)?;
            debug!("Created data folder {}", self.folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.folder.join(DATABASE_FILE)
    }
}
