// Print/export step: QR payload, copy count, session reset
use crate::error::KioskError;
use crate::events::{emit, EventSender, KioskEvent};
use crate::models::SubjectPhoto;
use crate::session::{put_record, SessionKey};
use crate::steps::{require_saved_url, require_subject_photo, Step};
use crate::KioskContext;

/// QR-encodable payload for the saved image. The URL is wrapped verbatim;
/// rendering the code is the shell's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    payload: String,
}

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    pub fn into_string(self) -> String {
        self.payload
    }
}

pub fn finalize(ctx: &KioskContext) -> Result<EncodedPayload, KioskError> {
    let saved_url = require_saved_url(&ctx.store)?;
    Ok(EncodedPayload { payload: saved_url })
}

/// Records the print copy count against the photo. The requested count is
/// clamped into the configured range (a single copy by default).
pub fn record_print_intent(
    ctx: &KioskContext,
    copies: u32,
    events: &Option<EventSender>,
) -> Result<SubjectPhoto, KioskError> {
    let mut photo = require_subject_photo(&ctx.store)?;
    let photo_name = photo.canonical_name();
    let copies = ctx.config.clamp_copies(copies);

    let record = ctx.backend.set_print_count(&photo_name, copies)?;
    photo.print_count = record.quantidade;
    photo.printed = record.impressa;
    put_record(ctx.store.as_ref(), SessionKey::SubjectPhoto, &photo)?;

    emit(events, KioskEvent::PrintRecorded { copies });
    log::info!("Recorded {} print copies for '{}'", copies, photo_name);
    Ok(photo)
}

/// Purges every persisted session entity and returns control to capture.
pub fn start_over(ctx: &KioskContext) -> Result<Step, KioskError> {
    ctx.controller.reset();
    ctx.store.clear_all()?;
    log::info!("Session reset, returning to capture");
    Ok(Step::Capture)
}
