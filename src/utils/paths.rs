use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::KioskError;

static APP_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

pub fn get_app_data_dir() -> PathBuf {
    APP_DATA_DIR
        .get_or_init(|| {
            let base_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            base_dir.join("Retrato")
        })
        .clone()
}

/// Durable session state lives here, one JSON file per key.
pub fn get_session_dir() -> PathBuf {
    get_app_data_dir().join("session")
}

pub fn get_logs_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

pub fn get_settings_json_path() -> PathBuf {
    get_app_data_dir().join("settings.json")
}

pub fn initialize_data_directories() -> Result<(), KioskError> {
    let directories = [get_session_dir(), get_logs_dir()];

    for dir in &directories {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                KioskError::store(format!("failed to create directory {:?}: {}", dir, e))
            })?;
            log::debug!("Created directory: {:?}", dir);
        }
    }

    Ok(())
}
