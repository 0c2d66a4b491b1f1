use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TirgusError};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_USER: &str = "demo";

/// Configuration for tirgus, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TirgusConfig {
    /// Account label attached to favorite sync calls.
    #[serde(default = "default_user")]
    pub user: String,

    /// Pins the dashboard's "new today" reference date. Unset means the
    /// current date; the bundled demo data sets it to its posting window.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for TirgusConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            reference_date: None,
        }
    }
}

impl TirgusConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TirgusError::Io)?;
        let config: TirgusConfig =
            serde_json::from_str(&content).map_err(TirgusError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TirgusError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TirgusError::Serialization)?;
        fs::write(config_path, content).map_err(TirgusError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TirgusConfig::default();
        assert_eq!(config.user, "demo");
        assert_eq!(config.reference_date, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = TirgusConfig::load(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config, TirgusConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let config = TirgusConfig {
            user: "alice".to_string(),
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 15),
        };
        config.save(temp_dir.path()).unwrap();

        let loaded = TirgusConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: TirgusConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TirgusConfig::default());
    }
}
