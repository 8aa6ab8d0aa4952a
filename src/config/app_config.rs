use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::services::export_service::CsvQuoting;

pub const DEFAULT_API_URL: &str = "https://allcity-transport-erp.onrender.com";
pub const API_URL_ENV: &str = "FLEETDESK_API_URL";
pub const LOG_LEVEL_ENV: &str = "FLEETDESK_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    pub api: ApiConfig,
    pub export: ExportConfig,
    pub cache: CacheConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend root, without the `/api` prefix
    pub base_url: String,

    /// Per-request timeout (in seconds)
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    pub csv_quoting: CsvQuoting,
    pub lines_per_page: usize,
    /// Prepended to document and paginated export titles
    pub title_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Keep failed creates locally for a later sync
    pub enabled: bool,
    /// Defaults to `<data_dir>/fleetdesk/pending`
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            api: ApiConfig::default(),
            export: ExportConfig::default(),
            cache: CacheConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_quoting: CsvQuoting::Verbatim,
            lines_per_page: 24,
            title_prefix: "AllCity Transport".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

impl AppConfig {
    /// Load configuration from the user config directory, writing defaults
    /// on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            default_config
        };

        Ok(config.with_env_overrides())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("fleetdesk").join("config.toml"))
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
        self
    }

    /// Directory for unsynced writes, if caching is on
    pub fn cache_dir(&self) -> Option<PathBuf> {
        if !self.cache.enabled {
            return None;
        }
        self.cache
            .dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("fleetdesk").join("pending")))
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl ExportConfig {
    /// `Vehicle Purchase Reports` -> `AllCity Transport - Vehicle Purchase Reports`
    pub fn full_title(&self, title: &str) -> String {
        if self.title_prefix.is_empty() {
            title.to_string()
        } else {
            format!("{} - {}", self.title_prefix, title)
        }
    }
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.export.lines_per_page, 24);
        assert_eq!(config.export.csv_quoting, CsvQuoting::Verbatim);
        assert_eq!(config.notifications.duration(), Duration::from_millis(3000));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.api.base_url = "http://localhost:8080/".to_string();
        config.export.csv_quoting = CsvQuoting::Rfc4180;
        config.cache.dir = Some(dir.path().join("pending"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.api.normalized_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n\n[export]\nlines_per_page = 40\n").unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.export.lines_per_page, 40);
        assert_eq!(loaded.export.title_prefix, "AllCity Transport");
        assert_eq!(loaded.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_cache_dir_respects_enabled_flag() {
        let mut config = AppConfig::default();
        config.cache.dir = Some(PathBuf::from("/tmp/fleetdesk-pending"));
        assert_eq!(config.cache_dir(), Some(PathBuf::from("/tmp/fleetdesk-pending")));

        config.cache.enabled = false;
        assert_eq!(config.cache_dir(), None);
    }

    #[test]
    fn test_full_title() {
        let export = ExportConfig::default();
        assert_eq!(
            export.full_title("Drivers List"),
            "AllCity Transport - Drivers List"
        );

        let bare = ExportConfig {
            title_prefix: String::new(),
            ..ExportConfig::default()
        };
        assert_eq!(bare.full_title("Drivers List"), "Drivers List");
    }
}
