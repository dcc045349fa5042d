// Selected result data model
use serde::{Deserialize, Serialize};

/// The user's final pick among the generated images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedResult {
    /// One of the generation job's result URLs.
    pub source_url: String,
    /// URL returned by the backend after persisting the choice; falls
    /// back to `source_url` when the backend omits one.
    pub saved_url: String,
    pub created_at: String,
}

impl SelectedResult {
    pub fn new(source_url: String, saved_url: String) -> Self {
        Self {
            source_url,
            saved_url,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
