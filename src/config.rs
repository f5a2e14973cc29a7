//! Configuration management for the kiosk menu backend.
//!
//! Loads and saves the application configuration in TOML format from the
//! platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "KioskMenu";

/// Database location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:`
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = AppConfig::config_dir()
            .map(|dir| dir.join("kiosk_menu.db"))
            .unwrap_or_else(|_| PathBuf::from("kiosk_menu.db"));
        Self { path }
    }
}

/// Log file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolled log files
    pub dir: PathBuf,
    /// Prefix of each log file name
    pub app_name: String,
    /// Number of daily files kept on disk
    pub retain_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let dir = AppConfig::config_dir()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|_| PathBuf::from("logs"));
        Self {
            dir,
            app_name: "KioskMenu".to_string(),
            retain_files: 7,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store whose kiosk menu is being edited
    pub store_id: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_id: "default".to_string(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/KioskMenu/`
    /// - macOS: `~/Library/Application Support/KioskMenu/`
    /// - Windows: `%APPDATA%\KioskMenu\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace config file: {}", path.display()))?;

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.store_id.trim().is_empty() {
            anyhow::bail!("store_id must not be empty");
        }
        if self.logging.app_name.trim().is_empty() {
            anyhow::bail!("logging.app_name must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.store_id, "default");
        assert_eq!(config.logging.retain_files, 7);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = AppConfig::default();
        config.store_id = "store-42".to_string();
        config.database.path = PathBuf::from(":memory:");
        config.save_to(&path).unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "store_id = \"cafe\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.store_id, "cafe");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_blank_store_id_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "store_id = \"  \"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("store_id"));
        assert!(AppConfig { store_id: String::new(), ..AppConfig::default() }.save_to(&path).is_err());
    }
}
