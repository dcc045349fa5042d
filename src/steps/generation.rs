// Generation step: submit the resolved prompt and drive polling
use crate::error::KioskError;
use crate::events::{emit, EventSender, KioskEvent};
use crate::generation::PollOutcome;
use crate::steps::require_style_choice;
use crate::KioskContext;

/// Submits the persisted style choice's prompt as a new generation job.
pub fn start_generation(
    ctx: &KioskContext,
    events: &Option<EventSender>,
) -> Result<String, KioskError> {
    let choice = require_style_choice(&ctx.store)?;
    let job_id = ctx.controller.submit(&choice.resolved_prompt)?;
    emit(
        events,
        KioskEvent::GenerationSubmitted {
            job_id: job_id.clone(),
        },
    );
    Ok(job_id)
}

/// Polls the submitted job to completion, failure or cancellation.
pub async fn run_generation(
    ctx: &KioskContext,
    events: Option<EventSender>,
) -> Result<PollOutcome, KioskError> {
    ctx.controller.run(events).await
}

/// Tears the poll loop down when the user leaves the loading screen.
pub fn cancel_generation(ctx: &KioskContext) {
    ctx.controller.cancel();
}
