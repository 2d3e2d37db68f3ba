use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".budget_forecast";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// Environment variable that relocates the application home directory.
pub const HOME_ENV: &str = "BUDGET_FORECAST_HOME";

/// Returns the application-specific home directory, defaulting to `~/.budget_forecast`.
pub fn app_home_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default directory holding the collection files.
pub fn data_dir_in(home: &Path) -> PathBuf {
    home.join(DATA_DIR)
}

pub fn config_file_in(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
