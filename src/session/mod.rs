// Durable session store: one logical key per flow artifact
pub mod file_store;
pub mod memory;

pub use file_store::FileSessionStore;
pub use memory::MemorySessionStore;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::KioskError;

/// Logical keys of the kiosk session. At most one record is live per key;
/// "start over" removes them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    SubjectPhoto,
    SelectedGender,
    StyleChoice,
    GenerationJob,
    GeneratedImages,
    SelectedResult,
    SavedOutputUrl,
}

impl SessionKey {
    pub const ALL: [SessionKey; 7] = [
        SessionKey::SubjectPhoto,
        SessionKey::SelectedGender,
        SessionKey::StyleChoice,
        SessionKey::GenerationJob,
        SessionKey::GeneratedImages,
        SessionKey::SelectedResult,
        SessionKey::SavedOutputUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::SubjectPhoto => "subject_photo",
            SessionKey::SelectedGender => "selected_gender",
            SessionKey::StyleChoice => "style_choice",
            SessionKey::GenerationJob => "generation_job",
            SessionKey::GeneratedImages => "generated_images",
            SessionKey::SelectedResult => "selected_result",
            SessionKey::SavedOutputUrl => "saved_output_url",
        }
    }
}

/// Key/value persistence that survives a full restart of the kiosk shell.
/// A single logical flow accesses it sequentially; multi-tab concurrency
/// is out of scope.
pub trait SessionStore: Send + Sync {
    fn put(&self, key: SessionKey, value: Value) -> Result<(), KioskError>;
    fn get(&self, key: SessionKey) -> Result<Option<Value>, KioskError>;
    fn remove(&self, key: SessionKey) -> Result<(), KioskError>;
    fn clear_all(&self) -> Result<(), KioskError>;
}

pub fn put_record<T: Serialize>(
    store: &dyn SessionStore,
    key: SessionKey,
    record: &T,
) -> Result<(), KioskError> {
    let value = serde_json::to_value(record)
        .map_err(|e| KioskError::store(format!("failed to serialize {}: {}", key.as_str(), e)))?;
    store.put(key, value)
}

pub fn get_record<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: SessionKey,
) -> Result<Option<T>, KioskError> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| KioskError::store(format!("failed to parse {}: {}", key.as_str(), e))),
        None => Ok(None),
    }
}
