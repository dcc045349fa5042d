// Screen steps and their entry guards
//
// Each screen of the hosting shell calls into its module here when
// entered or acted on. Entry guards check the durable prerequisites and
// answer with a redirect instead of surfacing MissingSessionState.
pub mod generation;
pub mod print;
pub mod selection;
pub mod style;
pub mod upload;

use std::sync::Arc;

use crate::error::KioskError;
use crate::models::{Gender, StyleChoice, SubjectPhoto};
use crate::session::{get_record, SessionKey, SessionStore};
use crate::KioskContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Capture,
    GenderSelection,
    StyleSelection,
    Generation,
    ResultSelection,
    Print,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEntry {
    Ready,
    Redirect(Step),
}

pub(crate) fn require_subject_photo(
    store: &Arc<dyn SessionStore>,
) -> Result<SubjectPhoto, KioskError> {
    get_record(store.as_ref(), SessionKey::SubjectPhoto)?
        .ok_or(KioskError::MissingSessionState("subject_photo"))
}

pub(crate) fn require_gender(store: &Arc<dyn SessionStore>) -> Result<Gender, KioskError> {
    get_record(store.as_ref(), SessionKey::SelectedGender)?
        .ok_or(KioskError::MissingSessionState("selected_gender"))
}

pub(crate) fn require_style_choice(
    store: &Arc<dyn SessionStore>,
) -> Result<StyleChoice, KioskError> {
    get_record(store.as_ref(), SessionKey::StyleChoice)?
        .ok_or(KioskError::MissingSessionState("style_choice"))
}

pub(crate) fn require_generated_images(
    store: &Arc<dyn SessionStore>,
) -> Result<Vec<String>, KioskError> {
    let images: Vec<String> = get_record(store.as_ref(), SessionKey::GeneratedImages)?
        .ok_or(KioskError::MissingSessionState("generated_images"))?;
    if images.is_empty() {
        return Err(KioskError::MissingSessionState("generated_images"));
    }
    Ok(images)
}

pub(crate) fn require_saved_url(store: &Arc<dyn SessionStore>) -> Result<String, KioskError> {
    get_record(store.as_ref(), SessionKey::SavedOutputUrl)?
        .ok_or(KioskError::MissingSessionState("saved_output_url"))
}

/// Entry check for a step. Missing prerequisites never surface as errors;
/// the flow is sent back to the step that can produce them.
pub fn enter(ctx: &KioskContext, step: Step) -> Result<StepEntry, KioskError> {
    let entry = match step {
        Step::Capture => StepEntry::Ready,

        Step::GenderSelection => guarded(require_subject_photo(&ctx.store), Step::Capture)?,

        Step::StyleSelection => guarded(
            require_subject_photo(&ctx.store).and_then(|_| require_gender(&ctx.store)),
            Step::Capture,
        )?,

        Step::Generation => {
            match guarded(
                require_subject_photo(&ctx.store)
                    .and_then(|_| require_gender(&ctx.store))
                    .and_then(|_| require_style_choice(&ctx.store)),
                Step::Capture,
            )? {
                StepEntry::Redirect(to) => StepEntry::Redirect(to),
                StepEntry::Ready if ctx.controller.is_active() => StepEntry::Ready,
                StepEntry::Ready => {
                    // A reload mid-poll does not resume the persisted job;
                    // stale job state is purged and the flow restarts at
                    // style selection.
                    if ctx.store.get(SessionKey::GenerationJob)?.is_some() {
                        log::info!("Purging stale generation job after reload");
                        ctx.store.remove(SessionKey::GenerationJob)?;
                        ctx.store.remove(SessionKey::GeneratedImages)?;
                    }
                    StepEntry::Redirect(Step::StyleSelection)
                }
            }
        }

        Step::ResultSelection => guarded(
            require_style_choice(&ctx.store)
                .and_then(|_| require_generated_images(&ctx.store)),
            Step::Capture,
        )?,

        Step::Print => match require_saved_url(&ctx.store) {
            Ok(_) => StepEntry::Ready,
            Err(KioskError::MissingSessionState(_)) => {
                // With results on hand the user only needs to re-pick.
                if require_generated_images(&ctx.store).is_ok() {
                    StepEntry::Redirect(Step::ResultSelection)
                } else {
                    StepEntry::Redirect(Step::Capture)
                }
            }
            Err(e) => return Err(e),
        },
    };

    if let StepEntry::Redirect(to) = entry {
        log::info!("Step {:?} not ready, redirecting to {:?}", step, to);
    }
    Ok(entry)
}

fn guarded<T>(result: Result<T, KioskError>, redirect: Step) -> Result<StepEntry, KioskError> {
    match result {
        Ok(_) => Ok(StepEntry::Ready),
        Err(KioskError::MissingSessionState(_)) => Ok(StepEntry::Redirect(redirect)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{GenerationBackend, SaveSelectionResponse};
    use crate::config::KioskConfig;
    use crate::models::{PhotoRecord, ProgressSnapshot};
    use crate::session::{put_record, MemorySessionStore};

    /// Guard checks never reach the backend.
    struct NoopBackend;

    impl GenerationBackend for NoopBackend {
        fn upload_photo(
            &self,
            _image: &[u8],
            _on_progress: &mut dyn FnMut(u8),
        ) -> Result<PhotoRecord, KioskError> {
            unimplemented!("guard tests never call the backend")
        }

        fn submit_generation(&self, _prompt: &str) -> Result<String, KioskError> {
            unimplemented!("guard tests never call the backend")
        }

        fn poll_progress(&self, _job_id: &str) -> Result<ProgressSnapshot, KioskError> {
            unimplemented!("guard tests never call the backend")
        }

        fn save_selection(
            &self,
            _photo_name: &str,
            _image_url: &str,
        ) -> Result<SaveSelectionResponse, KioskError> {
            unimplemented!("guard tests never call the backend")
        }

        fn set_print_count(
            &self,
            _photo_name: &str,
            _copies: u32,
        ) -> Result<PhotoRecord, KioskError> {
            unimplemented!("guard tests never call the backend")
        }
    }

    fn test_ctx() -> KioskContext {
        KioskContext::new(
            KioskConfig::default(),
            Arc::new(MemorySessionStore::new()),
            Arc::new(NoopBackend),
        )
    }

    fn persist_photo(ctx: &KioskContext) {
        let photo = SubjectPhoto::from_record(PhotoRecord {
            id: 1,
            nome: "foto_1.jpg".to_string(),
            original_url: "https://cdn.test/foto_1.jpg".to_string(),
            ia_url: None,
            quantidade: 0,
            impressa: false,
        });
        put_record(ctx.store.as_ref(), SessionKey::SubjectPhoto, &photo).unwrap();
    }

    #[test]
    fn test_capture_is_always_ready() {
        let ctx = test_ctx();
        assert_eq!(enter(&ctx, Step::Capture).unwrap(), StepEntry::Ready);
    }

    #[test]
    fn test_downstream_steps_redirect_to_capture_on_empty_session() {
        let ctx = test_ctx();
        for step in [
            Step::GenderSelection,
            Step::StyleSelection,
            Step::Generation,
            Step::ResultSelection,
            Step::Print,
        ] {
            assert_eq!(
                enter(&ctx, step).unwrap(),
                StepEntry::Redirect(Step::Capture),
                "{:?}",
                step
            );
        }
    }

    #[test]
    fn test_gender_selection_ready_once_photo_persisted() {
        let ctx = test_ctx();
        persist_photo(&ctx);
        assert_eq!(enter(&ctx, Step::GenderSelection).unwrap(), StepEntry::Ready);
        // still no gender
        assert_eq!(
            enter(&ctx, Step::StyleSelection).unwrap(),
            StepEntry::Redirect(Step::Capture)
        );
    }

    #[test]
    fn test_print_with_results_redirects_to_result_selection() {
        let ctx = test_ctx();
        persist_photo(&ctx);
        put_record(
            ctx.store.as_ref(),
            SessionKey::GeneratedImages,
            &vec!["https://cdn.test/a.png".to_string()],
        )
        .unwrap();

        assert_eq!(
            enter(&ctx, Step::Print).unwrap(),
            StepEntry::Redirect(Step::ResultSelection)
        );
    }

    #[test]
    fn test_record_gender_without_photo_is_missing_state() {
        let ctx = test_ctx();
        let err = style::record_gender(&ctx, Gender::Masculine).unwrap_err();
        assert!(matches!(err, KioskError::MissingSessionState(_)));
    }

    #[test]
    fn test_select_result_rejects_url_outside_result_set() {
        let ctx = test_ctx();
        persist_photo(&ctx);
        put_record(
            ctx.store.as_ref(),
            SessionKey::GeneratedImages,
            &vec!["https://cdn.test/a.png".to_string()],
        )
        .unwrap();

        let err = selection::select_result(&ctx, "https://cdn.test/other.png").unwrap_err();
        assert!(matches!(err, KioskError::SaveFailed(_)));
    }
}
