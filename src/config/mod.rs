use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir, write_atomic},
    domain::TimeWindow,
    errors::LedgerError,
    storage::json_backend::DEFAULT_SLOT,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub default_window: TimeWindow,
    pub slot_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            default_window: TimeWindow::Weekly,
            slot_name: DEFAULT_SLOT.into(),
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    /// Reads the configuration file, falling back to defaults when absent.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|err| LedgerError::Config(format!("{}: {err}", self.path.display())))?;
        serde_json::from_str(&data)
            .map_err(|err| LedgerError::Config(format!("{}: {err}", self.path.display())))
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_window, TimeWindow::Weekly);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency_symbol: "$".into(),
            default_window: TimeWindow::Monthly,
            slot_name: "household".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"default_window":"yearly"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_window, TimeWindow::Yearly);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }
}
