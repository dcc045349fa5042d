// Subject photo data models
use serde::{Deserialize, Serialize};

/// Wire shape the backend uses for photo records. The upload and
/// print-count endpoints both answer with this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub ia_url: Option<String>,
    #[serde(default)]
    pub quantidade: u32,
    #[serde(default)]
    pub impressa: bool,
}

/// The originally captured portrait, as tracked across the session.
/// Exactly one is live at a time; "start over" deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectPhoto {
    pub id: i64,
    /// Stable reference string assigned by the backend, used to build
    /// storage URLs and the canonical print name.
    pub name: String,
    pub original_url: String,
    pub generated_url: Option<String>,
    pub print_count: u32,
    pub printed: bool,
    pub created_at: String,
}

impl SubjectPhoto {
    pub fn from_record(record: PhotoRecord) -> Self {
        Self {
            id: record.id,
            name: record.nome,
            original_url: record.original_url,
            generated_url: record.ia_url,
            print_count: record.quantidade,
            printed: record.impressa,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn canonical_name(&self) -> String {
        canonical_photo_name(&self.name)
    }
}

/// Normalizes an uploaded photo name into the `foto<N>` form the backend
/// keys its save-ia and quantidade endpoints on.
///
/// `"foto_42.jpg"` -> `"foto42"`, `"foto3.png"` -> `"foto3"`, anything
/// that doesn't look like a foto name falls back to `"foto1"`.
pub fn canonical_photo_name(name: &str) -> String {
    let base = match name.rsplit_once('.') {
        Some((stem, ext))
            if matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png") =>
        {
            stem
        }
        _ => name,
    };

    if let Some(suffix) = base.strip_prefix("foto_") {
        let number = suffix.rsplit('_').next().unwrap_or("");
        if number.is_empty() {
            "foto1".to_string()
        } else {
            format!("foto{}", number)
        }
    } else if base.starts_with("foto") {
        base.to_string()
    } else {
        "foto1".to_string()
    }
}
