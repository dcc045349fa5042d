// Result selection: persist the user's pick against the subject photo
use crate::error::KioskError;
use crate::models::SelectedResult;
use crate::session::{put_record, SessionKey};
use crate::steps::{require_generated_images, require_subject_photo};
use crate::KioskContext;

/// Records the chosen result image. The backend's `ia_url` wins as the
/// saved URL; when it is omitted the selected source URL stands in.
/// Retryable without re-running the generation job.
pub fn select_result(ctx: &KioskContext, result_url: &str) -> Result<SelectedResult, KioskError> {
    let images = require_generated_images(&ctx.store)?;
    if !images.iter().any(|url| url == result_url) {
        return Err(KioskError::SaveFailed(
            "selected image is not part of the generated set".to_string(),
        ));
    }

    let mut photo = require_subject_photo(&ctx.store)?;
    let photo_name = photo.canonical_name();

    let response = ctx.backend.save_selection(&photo_name, result_url)?;
    let saved_url = response
        .ia_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| result_url.to_string());

    let selected = SelectedResult::new(result_url.to_string(), saved_url.clone());
    put_record(ctx.store.as_ref(), SessionKey::SelectedResult, &selected)?;
    put_record(ctx.store.as_ref(), SessionKey::SavedOutputUrl, &saved_url)?;

    photo.generated_url = Some(saved_url);
    put_record(ctx.store.as_ref(), SessionKey::SubjectPhoto, &photo)?;

    log::info!("Saved selected result for '{}'", photo_name);
    Ok(selected)
}
