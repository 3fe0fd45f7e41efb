//! Config - TOML 設定
//!
//! ```toml
//! [store]
//! backend = "file"          # or "memory"
//! data_dir = "/var/lib/taskboard"
//!
//! [log]
//! filter = "taskboard=debug"
//! ```
//!
//! 項目が無ければ既定値。シミュレーション実行の長さは設定できない。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::impls::{InMemoryKvStore, JsonFileStore};
use crate::ports::KvStore;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskboardConfig {
    pub store: StoreConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// `<data_dir>/<key>.json`
    #[default]
    File,
    /// Process-local; nothing survives exit.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "taskboard=info,taskboard_core=info".to_string(),
        }
    }
}

/// `dirs::data_dir()/taskboard`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("taskboard"))
        .unwrap_or_else(|| PathBuf::from(".taskboard"))
}

/// `dirs::config_dir()/taskboard/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("taskboard"))
        .unwrap_or_else(|| PathBuf::from(".taskboard"))
        .join("config.toml")
}

impl TaskboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Open the configured storage medium.
    pub fn open_store(&self) -> Arc<dyn KvStore> {
        match self.store.backend {
            StoreBackend::File => Arc::new(JsonFileStore::new(&self.store.data_dir)),
            StoreBackend::Memory => Arc::new(InMemoryKvStore::new()),
        }
    }
}
