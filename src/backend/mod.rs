// Backend seam: one trait, picked once at startup (HTTP or mock)
pub mod http;
pub mod mock;

pub use http::HttpBackend;
pub use mock::MockBackend;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::models::{PhotoRecord, ProgressSnapshot};

/// Response of the generation submit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub task_id: String,
}

/// Response of the save-ia endpoint. Backends that persist to object
/// storage answer with the stored URL; older ones omit it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveSelectionResponse {
    #[serde(default)]
    pub ia_url: Option<String>,
}

/// Everything the kiosk flow needs from the photo/generation backend.
pub trait GenerationBackend: Send + Sync {
    /// Uploads the captured portrait, reporting transfer progress 0-100.
    fn upload_photo(
        &self,
        image: &[u8],
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<PhotoRecord, KioskError>;

    /// Posts a resolved prompt; returns the backend's task id.
    fn submit_generation(&self, prompt: &str) -> Result<String, KioskError>;

    /// One progress query for an in-flight job.
    fn poll_progress(&self, job_id: &str) -> Result<ProgressSnapshot, KioskError>;

    /// Persists the chosen result image against the photo name.
    fn save_selection(
        &self,
        photo_name: &str,
        image_url: &str,
    ) -> Result<SaveSelectionResponse, KioskError>;

    /// Records the print copy count for the photo.
    fn set_print_count(&self, photo_name: &str, copies: u32) -> Result<PhotoRecord, KioskError>;
}

pub fn backend_from_config(config: &KioskConfig) -> Arc<dyn GenerationBackend> {
    if config.use_mocks {
        log::info!("Mock backend enabled, all requests are simulated locally");
        Arc::new(MockBackend::new(config))
    } else {
        Arc::new(HttpBackend::new(config.clone()))
    }
}
