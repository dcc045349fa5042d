// Upload Gateway: captured frame -> backend -> persisted SubjectPhoto
use crate::error::KioskError;
use crate::events::{emit, EventSender, KioskEvent};
use crate::models::SubjectPhoto;
use crate::session::{put_record, SessionKey};
use crate::KioskContext;

/// Uploads the captured portrait and persists the resulting record.
///
/// Exactly one store write happens on success and none on failure, so a
/// failed upload leaves the session clean for a retake.
pub fn upload_subject_photo(
    ctx: &KioskContext,
    image: &[u8],
    events: &Option<EventSender>,
) -> Result<SubjectPhoto, KioskError> {
    if image.is_empty() {
        return Err(KioskError::InvalidFrame("empty capture".to_string()));
    }

    let mut last_percent = 0u8;
    let mut on_progress = |percent: u8| {
        if percent != last_percent {
            last_percent = percent;
            emit(events, KioskEvent::UploadProgress { percent });
        }
    };

    let record = ctx.backend.upload_photo(image, &mut on_progress)?;
    let photo = SubjectPhoto::from_record(record);

    put_record(ctx.store.as_ref(), SessionKey::SubjectPhoto, &photo)?;
    log::info!("Subject photo '{}' persisted", photo.name);
    Ok(photo)
}
