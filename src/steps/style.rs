// Gender and style selection
use crate::catalog;
use crate::error::KioskError;
use crate::models::{Gender, StyleChoice};
use crate::prompt;
use crate::session::{put_record, SessionKey};
use crate::steps::{require_gender, require_subject_photo};
use crate::KioskContext;

pub fn record_gender(ctx: &KioskContext, gender: Gender) -> Result<(), KioskError> {
    require_subject_photo(&ctx.store)?;
    put_record(ctx.store.as_ref(), SessionKey::SelectedGender, &gender)?;
    log::info!("Selected gender: {}", gender);
    Ok(())
}

/// Confirms the style pick: resolves the prompt from the catalog and
/// persists the finished `StyleChoice`. Rejected while a generation job
/// is in flight, the choice a job was submitted against is immutable.
pub fn confirm_style(ctx: &KioskContext, style_id: &str) -> Result<StyleChoice, KioskError> {
    if ctx.controller.is_active() {
        return Err(KioskError::GenerationInFlight);
    }

    let photo = require_subject_photo(&ctx.store)?;
    let gender = require_gender(&ctx.store)?;

    let subject_photo_url = if photo.original_url.is_empty() {
        ctx.config.subject_photo_url(&photo.name)
    } else {
        photo.original_url.clone()
    };

    let style = catalog::find_style(style_id).ok_or_else(|| KioskError::UnknownStyle {
        gender,
        style_id: style_id.to_string(),
    })?;
    let style_reference_url = style.reference_url(gender).to_string();

    let resolved_prompt =
        prompt::resolve(gender, style_id, &subject_photo_url, &style_reference_url)?;

    let choice = StyleChoice::new(
        gender,
        style_id.to_string(),
        resolved_prompt,
        subject_photo_url,
        style_reference_url,
    );
    put_record(ctx.store.as_ref(), SessionKey::StyleChoice, &choice)?;
    log::info!("Confirmed style '{}' ({})", style_id, gender);
    Ok(choice)
}
