// Error taxonomy for the kiosk flow
use thiserror::Error;

use crate::models::Gender;

#[derive(Debug, Error)]
pub enum KioskError {
    /// Upload of the captured photo did not reach a 2xx response.
    #[error("photo upload failed: {0}")]
    UploadFailed(String),

    /// The (gender, style) pair has no catalog entry.
    #[error("no prompt template for style '{style_id}' ({gender})")]
    UnknownStyle { gender: Gender, style_id: String },

    /// Posting the generation job failed before a task id was issued.
    #[error("generation submit failed: {0}")]
    SubmissionFailed(String),

    /// A progress request failed mid-poll; polling stops after one failure.
    #[error("progress check failed: {0}")]
    PollError(String),

    /// The backend reported 100% progress without any result images.
    #[error("generation finished without result images")]
    ProtocolViolation,

    /// Persisting the chosen result failed; the selection can be retried.
    #[error("saving selected photo failed: {0}")]
    SaveFailed(String),

    /// Recording the print copy count failed.
    #[error("print count update failed: {0}")]
    PrintUpdateFailed(String),

    /// A step was entered before its predecessor persisted the data it
    /// needs. Recovered by redirecting, never shown to the user.
    #[error("missing session state: {0}")]
    MissingSessionState(&'static str),

    /// A second submit was attempted while a job is still in flight.
    #[error("a generation job is already in flight")]
    GenerationInFlight,

    /// Session store I/O or serialization problem.
    #[error("session store error: {0}")]
    Store(String),

    /// Capture input could not be decoded into image bytes.
    #[error("invalid captured frame: {0}")]
    InvalidFrame(String),
}

impl KioskError {
    pub fn store(message: impl Into<String>) -> Self {
        KioskError::Store(message.into())
    }
}
