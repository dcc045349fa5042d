// Gender and style selection data models
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Masculine,
    Feminine,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Masculine => write!(f, "masculine"),
            Gender::Feminine => write!(f, "feminine"),
        }
    }
}

/// The confirmed gender + style pick, with the fully resolved prompt.
/// Immutable once a generation job has been submitted against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleChoice {
    pub gender: Gender,
    pub style_id: String,
    /// Always rebuilt from the catalog template; never hand-edited.
    pub resolved_prompt: String,
    pub subject_photo_url: String,
    pub style_reference_url: String,
    pub created_at: String,
}

impl StyleChoice {
    pub fn new(
        gender: Gender,
        style_id: String,
        resolved_prompt: String,
        subject_photo_url: String,
        style_reference_url: String,
    ) -> Self {
        Self {
            gender,
            style_id,
            resolved_prompt,
            subject_photo_url,
            style_reference_url,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
