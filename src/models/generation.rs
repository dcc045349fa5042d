// Generation job data models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Submitted,
    InProgress,
    Completed,
    Failed,
}

/// Persisted snapshot of one asynchronous generation request. Rewritten
/// on every poll tick so a wedged kiosk can be inspected from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    pub job_id: String,
    pub status: JobStatus,
    pub progress: u8, // 0-100
    pub result_urls: Vec<String>,
    pub error: Option<String>,
    pub created_at: String,
    pub last_polled_at: Option<String>,
}

impl GenerationJob {
    pub fn new(job_id: String) -> Self {
        Self {
            job_id,
            status: JobStatus::Submitted,
            progress: 0,
            result_urls: Vec::new(),
            error: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            last_polled_at: None,
        }
    }
}

/// One backend answer to a progress poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub progress: u8,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
}
