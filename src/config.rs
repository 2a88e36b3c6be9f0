//! App Configuration
//!
//! Stored as JSON; every field has a default, so a missing file or a
//! partial file is fine. A malformed file is an error.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};

/// Overrides `data_dir` when set
pub const DATA_DIR_ENV: &str = "RESCUE_READY_DATA_DIR";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    /// Nothing survives the process
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub backend: StorageBackend,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    pub app_name: String,
    pub logging_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("RescueReady");
        Self {
            data_dir,
            db_file_name: "rescue_ready.db".to_string(),
            backend: StorageBackend::Sqlite,
            log_dir: None,
            app_name: "RescueReady".to_string(),
            logging_enabled: true,
        }
    }
}

impl AppConfig {
    /// In-memory storage, no log files; for tests and previews
    pub fn ephemeral() -> Self {
        Self {
            backend: StorageBackend::Memory,
            logging_enabled: false,
            ..Self::default()
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }

    /// Read `path` (defaults when absent), then apply environment overrides
    pub fn load(path: &Path) -> DomainResult<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                DomainError::Storage(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                DomainError::InvalidInput(format!("Invalid config {}: {}", path.display(), e))
            })?
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_data_dir_override(std::env::var_os(DATA_DIR_ENV));
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> DomainResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Storage(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| DomainError::Internal(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| DomainError::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn apply_data_dir_override(&mut self, value: Option<OsString>) {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.db_path(), config.data_dir.join("rescue_ready.db"));
        assert_eq!(config.log_dir(), config.data_dir.join("logs"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        let mut expected = AppConfig::default();
        // Environment may point data_dir elsewhere
        config.data_dir = PathBuf::new();
        expected.data_dir = PathBuf::new();
        assert_eq!(config, expected);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"backend":"memory","app_name":"Drill"}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.app_name, "Drill");
        assert_eq!(config.db_file_name, "rescue_ready.db");
        assert!(config.logging_enabled);
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"backend":"floppy"}"#).unwrap();

        assert!(matches!(AppConfig::load(&path), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            log_dir: Some(dir.path().join("custom-logs")),
            ..AppConfig::ephemeral()
        };
        config.save(&path).unwrap();

        let mut loaded = AppConfig::load(&path).unwrap();
        loaded.data_dir = config.data_dir.clone();
        assert_eq!(loaded, config);
        assert_eq!(loaded.log_dir(), dir.path().join("custom-logs"));
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.apply_data_dir_override(Some(OsString::from("/tmp/drill")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/drill"));

        config.apply_data_dir_override(Some(OsString::new()));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/drill"));

        config.apply_data_dir_override(None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/drill"));
    }
}
