use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{info, warn};

use crate::core::utils::ensure_dir;

use super::{Collection, Result, StorageBackend};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed store: one pretty-printed JSON document per collection.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        ensure_dir(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", collection.key(), FILE_EXTENSION))
    }

    /// Writes the empty value of every collection that has no file yet.
    pub fn initialize(&self) -> Result<()> {
        for collection in Collection::ALL {
            let path = self.collection_path(collection);
            if !path.exists() {
                let json = serde_json::to_string_pretty(&collection.empty_value())?;
                write_atomic(&path, &json)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn get(&self, collection: Collection) -> Result<Option<Value>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        match serde_json::from_str(&data) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable collection file ignored");
                Ok(None)
            }
        }
    }

    fn put(&self, collection: Collection, value: &Value) -> Result<()> {
        let path = self.collection_path(collection);
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&path, &json)?;
        info!(%collection, path = %path.display(), "collection saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Stages the document next to its destination, then renames it into place.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
