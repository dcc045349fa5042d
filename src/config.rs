// Kiosk configuration: persisted settings with environment overrides
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::KioskError;
use crate::file_manager::read_json_file;
use crate::utils::get_settings_json_path;

pub const ENV_API_URL: &str = "RETRATO_API_URL";
pub const ENV_USE_MOCKS: &str = "RETRATO_USE_MOCKS";
pub const ENV_POLL_INTERVAL_MS: &str = "RETRATO_POLL_INTERVAL_MS";
pub const ENV_STORAGE_URL: &str = "RETRATO_STORAGE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Base URL of the photo/generation backend.
    pub base_url: String,
    /// Simulate the whole backend locally (development kiosks).
    pub use_mocks: bool,
    /// Delay between progress polls.
    pub poll_interval_ms: u64,
    /// Object-storage base the subject photo URLs are built from.
    pub photo_storage_base: String,
    /// How many images one generation job yields.
    pub result_count: usize,
    pub print_copies_min: u32,
    pub print_copies_max: u32,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000"),
            use_mocks: false,
            poll_interval_ms: 2000,
            photo_storage_base: String::from(
                "https://fotoai-picbrand.s3.sa-east-1.amazonaws.com",
            ),
            result_count: 4,
            print_copies_min: 1,
            print_copies_max: 1,
        }
    }
}

impl KioskConfig {
    /// Settings file first (if the operator wrote one), environment wins.
    pub fn load() -> Self {
        let path = get_settings_json_path();
        let mut config = if path.exists() {
            read_json_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable settings file: {}", e);
                KioskConfig::default()
            })
        } else {
            KioskConfig::default()
        };
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(ENV_API_URL) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }
        if let Ok(use_mocks) = std::env::var(ENV_USE_MOCKS) {
            self.use_mocks = use_mocks.trim().eq_ignore_ascii_case("true");
        }
        if let Ok(interval) = std::env::var(ENV_POLL_INTERVAL_MS) {
            if let Ok(ms) = interval.trim().parse::<u64>() {
                self.poll_interval_ms = ms;
            }
        }
        if let Ok(storage) = std::env::var(ENV_STORAGE_URL) {
            if !storage.trim().is_empty() {
                self.photo_storage_base = storage.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), KioskError> {
        Url::parse(&self.base_url)
            .map_err(|e| KioskError::store(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        Url::parse(&self.photo_storage_base).map_err(|e| {
            KioskError::store(format!(
                "invalid photo storage URL '{}': {}",
                self.photo_storage_base, e
            ))
        })?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Full URL for a backend endpoint path like `/generate`.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Storage URL for an uploaded subject photo. Names usually carry an
    /// image extension already; bare names get `.png` appended.
    pub fn subject_photo_url(&self, name: &str) -> String {
        let base = self.photo_storage_base.trim_end_matches('/');
        let has_extension = name
            .rsplit_once('.')
            .map(|(_, ext)| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
            .unwrap_or(false);
        if has_extension {
            format!("{}/{}", base, name)
        } else {
            format!("{}/{}.png", base, name)
        }
    }

    pub fn clamp_copies(&self, copies: u32) -> u32 {
        copies.clamp(self.print_copies_min, self.print_copies_max)
    }
}
