use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{config_file_in, data_dir_in, ensure_dir};
use crate::errors::ForecastError;
use crate::ledger::settings::{DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS};
use crate::storage::json_backend::write_atomic;

/// Application level configuration, independent of any one ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Horizon used when the settings record carries no forecast end date.
    pub default_horizon_days: i64,
    /// `EnvFilter` directive; `RUST_LOG` still wins when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_horizon_days: DEFAULT_HORIZON_DAYS,
            log_filter: None,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), ForecastError> {
        if !(1..=MAX_HORIZON_DAYS).contains(&self.default_horizon_days) {
            return Err(ForecastError::Config(format!(
                "defaultHorizonDays must be between 1 and {MAX_HORIZON_DAYS}, got {}",
                self.default_horizon_days
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    home: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at `home`; `config.json` lives directly inside it.
    pub fn with_home(home: impl Into<PathBuf>) -> Result<Self, ForecastError> {
        let home = home.into();
        ensure_dir(&home)?;
        Ok(Self {
            path: config_file_in(&home),
            home,
        })
    }

    pub fn load(&self) -> Result<Config, ForecastError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            ForecastError::Config(format!("{} is not valid: {err}", self.path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ForecastError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    /// Directory holding the collection files: the configured one, else `<home>/data`.
    /// Relative overrides are taken relative to the home directory.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        match &config.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.home.join(dir),
            None => data_dir_in(&self.home),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}
