use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::fs;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_history_samples")]
    pub history_samples: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_graph_width")]
    pub graph_width: usize,
    #[serde(default = "default_graph_height")]
    pub graph_height: usize,
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

fn default_interval_ms() -> u64 { 1000 }
fn default_history_samples() -> usize { 60 }
fn default_graph_width() -> usize { 60 }
fn default_graph_height() -> usize { 6 }
fn default_clear_screen() -> bool { true }

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            history_samples: default_history_samples(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            graph_width: default_graph_width(),
            graph_height: default_graph_height(),
            clear_screen: default_clear_screen(),
        }
    }
}

impl Config {
    /// Loads the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh.interval_ms == 0 {
            return Err(Error::Config("refresh.interval_ms must be greater than 0".to_string()));
        }
        if self.refresh.history_samples == 0 {
            return Err(Error::Config("refresh.history_samples must be greater than 0".to_string()));
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| Error::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config/netwatch/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.refresh.interval_ms, 1000);
        assert_eq!(config.refresh.history_samples, 60);
        assert_eq!(config.display.graph_width, 60);
        assert_eq!(config.display.graph_height, 6);
        assert!(config.display.clear_screen);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[display]\ngraph_height = 10\n").unwrap();
        assert_eq!(config.display.graph_height, 10);
        assert_eq!(config.display.graph_width, 60);
        assert_eq!(config.refresh.interval_ms, 1000);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.refresh.history_samples, 60);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::parse("[refresh]\ninterval_ms = 0\n").is_err());
        assert!(Config::parse("[refresh]\nhistory_samples = 0\n").is_err());
        assert!(Config::parse("refresh = 3").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.refresh.interval_ms = 250;
        config.display.clear_screen = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.refresh.interval_ms, 250);
        assert!(!loaded.display.clear_screen);
    }
}
