#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use budget_forecast::{
    config::ConfigManager, core::ledger_manager::LedgerManager, storage::JsonStorage,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application home directory that is cleaned up when the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let home = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    home
}

/// Creates isolated managers backed by a unique home directory for each test.
pub fn setup_test_env() -> (LedgerManager, ConfigManager, PathBuf) {
    let home = temp_home();
    let config_manager = ConfigManager::with_home(&home).expect("create config manager");
    let config = config_manager.load().expect("default config");
    let data_dir = config_manager.data_dir(&config);
    let storage = JsonStorage::new(&data_dir).expect("create json storage backend");
    (LedgerManager::new(Box::new(storage)), config_manager, data_dir)
}

pub fn write_collection(data_dir: &Path, file: &str, body: &str) {
    std::fs::write(data_dir.join(file), body).expect("write collection file");
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
