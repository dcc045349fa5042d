// File-backed session store: one JSON document per key
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use super::{SessionKey, SessionStore};
use crate::error::KioskError;
use crate::file_manager::{read_json_file, write_json_file};
use crate::utils::get_session_dir;

pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the application data directory.
    pub fn at_default_location() -> Self {
        Self::new(get_session_dir())
    }

    fn key_path(&self, key: SessionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl SessionStore for FileSessionStore {
    fn put(&self, key: SessionKey, value: Value) -> Result<(), KioskError> {
        write_json_file(&self.key_path(key), &value)
    }

    fn get(&self, key: SessionKey) -> Result<Option<Value>, KioskError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        read_json_file(&path).map(Some)
    }

    fn remove(&self, key: SessionKey) -> Result<(), KioskError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| KioskError::store(format!("failed to remove {:?}: {}", path, e)))?;
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<(), KioskError> {
        for key in SessionKey::ALL {
            self.remove(key)?;
        }
        log::info!("Cleared session state");
        Ok(())
    }
}
