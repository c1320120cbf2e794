//! # Clientele Configuration
//!
//! Database location and list behaviour.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CLIENTELE_DB_PATH=/data/clientele.db                               │
//! │     CLIENTELE_PAGE_SIZE=25                                             │
//! │     CLIENTELE_DISCARD_STALE_RESPONSES=true                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/clientele/clientele.toml (Linux)                         │
//! │     ~/Library/Application Support/com.clientele.clientele/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/var/lib/clientele/clientele.db"
//! max_connections = 5
//! min_connections = 1
//! connect_timeout_secs = 30
//!
//! [list]
//! page_size = 10
//! discard_stale_responses = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use clientele_core::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use clientele_db::DbConfig;

use crate::error::{CollectionError, CollectionResult};

const CONFIG_FILE_NAME: &str = "clientele.toml";
const DATABASE_FILE_NAME: &str = "clientele.db";

// =============================================================================
// Database Settings
// =============================================================================

/// Where the record store lives and how its pool is sized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "clientele", "clientele")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl DatabaseSettings {
    /// Converts to the pool configuration used by `Database::new`.
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.path)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

// =============================================================================
// List Settings
// =============================================================================

/// Behaviour of the collection managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSettings {
    /// Page size used when a delete re-fetches before any fetch happened.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Drop a fetch response when a newer fetch started after it.
    ///
    /// Off by default: the last response to arrive wins.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListSettings {
    fn default() -> Self {
        ListSettings {
            page_size: default_page_size(),
            discard_stale_responses: false,
        }
    }
}

impl ListSettings {
    /// Page 1 at the configured page size.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page_size).unwrap_or_default()
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClienteleConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub list: ListSettings,
}

impl ClienteleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`clientele.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CollectionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> CollectionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CollectionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CollectionResult<()> {
        if self.list.page_size == 0 {
            return Err(CollectionError::InvalidConfig(
                "list.page_size must be greater than 0".into(),
            ));
        }

        if self.list.page_size > MAX_PAGE_SIZE {
            return Err(CollectionError::InvalidConfig(format!(
                "list.page_size must be at most {}, got {}",
                MAX_PAGE_SIZE, self.list.page_size
            )));
        }

        if self.database.max_connections == 0 {
            return Err(CollectionError::InvalidConfig(
                "database.max_connections must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Applies `CLIENTELE_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CLIENTELE_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(size) = lookup("CLIENTELE_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(n) => self.list.page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid CLIENTELE_PAGE_SIZE"),
            }
        }

        if let Some(flag) = lookup("CLIENTELE_DISCARD_STALE_RESPONSES") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.list.discard_stale_responses = true,
                "0" | "false" | "no" | "off" => self.list.discard_stale_responses = false,
                _ => warn!(value = %flag, "Ignoring invalid CLIENTELE_DISCARD_STALE_RESPONSES"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "clientele", "clientele")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
