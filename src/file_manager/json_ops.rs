// Atomic JSON file operations

use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::error::KioskError;

lazy_static::lazy_static! {
    static ref FILE_LOCK: Mutex<()> = Mutex::new(());
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, KioskError> {
    let _lock = FILE_LOCK
        .lock()
        .map_err(|e| KioskError::store(format!("lock error: {}", e)))?;

    if !path.exists() {
        return Err(KioskError::store(format!("file not found: {:?}", path)));
    }

    let mut file = File::open(path)
        .map_err(|e| KioskError::store(format!("failed to open {:?}: {}", path, e)))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| KioskError::store(format!("failed to read {:?}: {}", path, e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| KioskError::store(format!("failed to parse JSON from {:?}: {}", path, e)))
}

/// Writes JSON atomically using write-to-temp-then-rename
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), KioskError> {
    let _lock = FILE_LOCK
        .lock()
        .map_err(|e| KioskError::store(format!("lock error: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            KioskError::store(format!("failed to create directory {:?}: {}", parent, e))
        })?;
    }

    let json_string = serde_json::to_string_pretty(data)
        .map_err(|e| KioskError::store(format!("failed to serialize data: {}", e)))?;

    let temp_path = path.with_extension("tmp");

    let mut temp_file = File::create(&temp_path)
        .map_err(|e| KioskError::store(format!("failed to create temp file {:?}: {}", temp_path, e)))?;

    temp_file
        .write_all(json_string.as_bytes())
        .map_err(|e| KioskError::store(format!("failed to write to temp file: {}", e)))?;

    temp_file
        .sync_all()
        .map_err(|e| KioskError::store(format!("failed to sync temp file: {}", e)))?;

    fs::rename(&temp_path, path)
        .map_err(|e| KioskError::store(format!("failed to rename temp file to {:?}: {}", path, e)))?;

    Ok(())
}

pub fn initialize_json_file<T: Serialize>(path: &Path, default: &T) -> Result<(), KioskError> {
    if !path.exists() {
        log::debug!("Initializing JSON file: {:?}", path);
        write_json_file(path, default)?;
    }
    Ok(())
}

