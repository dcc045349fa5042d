// Generation job lifecycle controller
//
// Owns the submit -> poll -> complete/fail state machine. One job may be
// in flight per session; the poll loop is a self-rescheduling async task
// with a cancellation flag checked between ticks, so tearing the owning
// screen down stops all further polling.
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::backend::GenerationBackend;
use crate::error::KioskError;
use crate::events::{emit, EventSender, KioskEvent};
use crate::models::{GenerationJob, JobStatus, ProgressSnapshot};
use crate::session::{get_record, put_record, SessionKey, SessionStore};

/// In-memory state of the machine. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum JobPhase {
    Idle,
    Submitting,
    Polling(u8),
    Completed(Vec<String>),
    Failed(String),
}

impl JobPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, JobPhase::Submitting | JobPhase::Polling(_))
    }
}

/// How a poll loop run ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Completed(Vec<String>),
    Cancelled,
}

pub struct JobController {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn GenerationBackend>,
    poll_interval: Duration,
    phase: Mutex<JobPhase>,
    active: AtomicBool,
}

impl JobController {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn GenerationBackend>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            backend,
            poll_interval,
            phase: Mutex::new(JobPhase::Idle),
            active: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> JobPhase {
        self.phase.lock().clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Posts the resolved prompt and enters the polling state.
    ///
    /// A second submit while a job is in flight is rejected without
    /// touching the backend, whether or not the UI prevented it.
    pub fn submit(&self, prompt: &str) -> Result<String, KioskError> {
        {
            let mut phase = self.phase.lock();
            if phase.is_active() {
                return Err(KioskError::GenerationInFlight);
            }
            *phase = JobPhase::Submitting;
        }

        let job_id = match self.backend.submit_generation(prompt) {
            Ok(job_id) => job_id,
            Err(e) => {
                *self.phase.lock() = JobPhase::Idle;
                log::error!("Generation submit failed: {}", e);
                return Err(e);
            }
        };

        let job = GenerationJob::new(job_id.clone());
        if let Err(e) = put_record(self.store.as_ref(), SessionKey::GenerationJob, &job) {
            *self.phase.lock() = JobPhase::Idle;
            return Err(e);
        }

        *self.phase.lock() = JobPhase::Polling(0);
        self.active.store(true, Ordering::SeqCst);
        log::info!("Generation job {} submitted, polling starts", job_id);
        Ok(job_id)
    }

    /// One poll tick: queries the backend and applies the transition.
    ///
    /// Returns the new phase on `Polling`/`Completed`; a failed request
    /// or a 100%-without-images answer moves the machine to `Failed` and
    /// surfaces the error. A single failure ends polling; any retry is a
    /// fresh user-initiated submit.
    pub fn poll_once(&self, job_id: &str) -> Result<JobPhase, KioskError> {
        let snapshot = match self.backend.poll_progress(job_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.mark_failed(job_id, &e.to_string());
                return Err(e);
            }
        };

        self.apply_snapshot(job_id, snapshot)
    }

    fn apply_snapshot(
        &self,
        job_id: &str,
        snapshot: ProgressSnapshot,
    ) -> Result<JobPhase, KioskError> {
        if snapshot.progress >= 100 {
            let urls = snapshot.image_urls.unwrap_or_default();
            if urls.is_empty() {
                // 100% with no images is a backend contract breach; fail
                // instead of polling forever.
                self.mark_failed(job_id, "generation finished without result images");
                return Err(KioskError::ProtocolViolation);
            }

            self.persist_job(job_id, |job| {
                job.status = JobStatus::Completed;
                job.progress = 100;
                job.result_urls = urls.clone();
                job.last_polled_at = Some(chrono::Utc::now().to_rfc3339());
            })?;
            put_record(self.store.as_ref(), SessionKey::GeneratedImages, &urls)?;

            self.active.store(false, Ordering::SeqCst);
            let phase = JobPhase::Completed(urls);
            *self.phase.lock() = phase.clone();
            log::info!("Generation job {} completed", job_id);
            return Ok(phase);
        }

        // Percent values are trusted as monotonic and taken verbatim.
        let percent = snapshot.progress;
        self.persist_job(job_id, |job| {
            job.status = JobStatus::InProgress;
            job.progress = percent;
            job.last_polled_at = Some(chrono::Utc::now().to_rfc3339());
        })?;

        let phase = JobPhase::Polling(percent);
        *self.phase.lock() = phase.clone();
        log::debug!("Generation job {} at {}%", job_id, percent);
        Ok(phase)
    }

    /// Drives polling to completion, failure or cancellation. Each tick
    /// is one suspension point; no polls overlap.
    pub async fn run(&self, events: Option<EventSender>) -> Result<PollOutcome, KioskError> {
        let job: GenerationJob = get_record(self.store.as_ref(), SessionKey::GenerationJob)?
            .ok_or(KioskError::MissingSessionState("generation_job"))?;
        let job_id = job.job_id;

        loop {
            if !self.active.load(Ordering::SeqCst) {
                log::info!("Polling for {} cancelled, no further polls", job_id);
                return Ok(PollOutcome::Cancelled);
            }

            let phase = match self.poll_once(&job_id) {
                Ok(phase) => phase,
                Err(e) => {
                    emit(
                        &events,
                        KioskEvent::GenerationFailed {
                            message: e.to_string(),
                        },
                    );
                    return Err(e);
                }
            };

            match phase {
                JobPhase::Polling(percent) => {
                    emit(&events, KioskEvent::GenerationProgress { percent });
                    tokio::time::sleep(self.poll_interval).await;
                }
                JobPhase::Completed(urls) => {
                    emit(
                        &events,
                        KioskEvent::GenerationCompleted {
                            image_urls: urls.clone(),
                        },
                    );
                    return Ok(PollOutcome::Completed(urls));
                }
                other => {
                    log::warn!("Unexpected phase after poll tick: {:?}", other);
                    return Ok(PollOutcome::Cancelled);
                }
            }
        }
    }

    /// Stops the poll loop before its next tick. Persisted job state is
    /// left in place.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Back to `Idle`, e.g. after "start over" purged the session.
    pub fn reset(&self) {
        self.active.store(false, Ordering::SeqCst);
        *self.phase.lock() = JobPhase::Idle;
    }

    fn mark_failed(&self, job_id: &str, message: &str) {
        self.active.store(false, Ordering::SeqCst);
        *self.phase.lock() = JobPhase::Failed(message.to_string());
        log::error!("Generation job {} failed: {}", job_id, message);

        // Best effort; the in-memory phase is authoritative for the UI.
        let _ = self.persist_job(job_id, |job| {
            job.status = JobStatus::Failed;
            job.error = Some(message.to_string());
            job.last_polled_at = Some(chrono::Utc::now().to_rfc3339());
        });
    }

    fn persist_job<F>(&self, job_id: &str, update: F) -> Result<(), KioskError>
    where
        F: FnOnce(&mut GenerationJob),
    {
        let mut job: GenerationJob =
            get_record(self.store.as_ref(), SessionKey::GenerationJob)?
                .unwrap_or_else(|| GenerationJob::new(job_id.to_string()));
        update(&mut job);
        put_record(self.store.as_ref(), SessionKey::GenerationJob, &job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SaveSelectionResponse;
    use crate::models::PhotoRecord;
    use crate::session::MemorySessionStore;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    /// Backend that answers polls from a pre-recorded script.
    struct ScriptedBackend {
        polls: Mutex<VecDeque<Result<ProgressSnapshot, KioskError>>>,
        poll_calls: AtomicUsize,
        submit_calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(script: Vec<Result<ProgressSnapshot, KioskError>>) -> Self {
            Self {
                polls: Mutex::new(script.into()),
                poll_calls: AtomicUsize::new(0),
                submit_calls: AtomicUsize::new(0),
            }
        }

        fn poll_count(&self) -> usize {
            self.poll_calls.load(Ordering::SeqCst)
        }
    }

    fn tick(progress: u8) -> Result<ProgressSnapshot, KioskError> {
        Ok(ProgressSnapshot {
            progress,
            image_urls: None,
        })
    }

    fn done(urls: &[&str]) -> Result<ProgressSnapshot, KioskError> {
        Ok(ProgressSnapshot {
            progress: 100,
            image_urls: Some(urls.iter().map(|u| u.to_string()).collect()),
        })
    }

    impl GenerationBackend for ScriptedBackend {
        fn upload_photo(
            &self,
            _image: &[u8],
            _on_progress: &mut dyn FnMut(u8),
        ) -> Result<PhotoRecord, KioskError> {
            unimplemented!("not used by controller tests")
        }

        fn submit_generation(&self, _prompt: &str) -> Result<String, KioskError> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            Ok("task_abc".to_string())
        }

        fn poll_progress(&self, _job_id: &str) -> Result<ProgressSnapshot, KioskError> {
            self.poll_calls.fetch_add(1, Ordering::SeqCst);
            self.polls
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(KioskError::PollError("script exhausted".to_string())))
        }

        fn save_selection(
            &self,
            _photo_name: &str,
            _image_url: &str,
        ) -> Result<SaveSelectionResponse, KioskError> {
            unimplemented!("not used by controller tests")
        }

        fn set_print_count(
            &self,
            _photo_name: &str,
            _copies: u32,
        ) -> Result<PhotoRecord, KioskError> {
            unimplemented!("not used by controller tests")
        }
    }

    fn controller(
        script: Vec<Result<ProgressSnapshot, KioskError>>,
    ) -> (JobController, Arc<ScriptedBackend>, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let backend = Arc::new(ScriptedBackend::new(script));
        let controller = JobController::new(store.clone(), backend.clone(), Duration::ZERO);
        (controller, backend, store)
    }

    #[test]
    fn test_submit_enters_polling_and_persists_job() {
        let (controller, backend, store) = controller(vec![]);

        let job_id = controller.submit("a prompt").unwrap();
        assert_eq!(job_id, "task_abc");
        assert_eq!(controller.phase(), JobPhase::Polling(0));
        assert!(controller.is_active());
        assert_eq!(backend.submit_calls.load(Ordering::SeqCst), 1);

        let job: GenerationJob =
            get_record(store.as_ref(), SessionKey::GenerationJob).unwrap().unwrap();
        assert_eq!(job.job_id, "task_abc");
        assert_eq!(job.status, JobStatus::Submitted);
    }

    #[test]
    fn test_second_submit_rejected_while_active() {
        let (controller, backend, _) = controller(vec![]);
        controller.submit("a prompt").unwrap();

        let err = controller.submit("another prompt").unwrap_err();
        assert!(matches!(err, KioskError::GenerationInFlight));
        assert_eq!(backend.submit_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_poll_sequence_reaches_completed() {
        let urls = ["https://cdn.test/r1.png", "https://cdn.test/r2.png"];
        let (controller, backend, store) = controller(vec![
            tick(10),
            tick(40),
            tick(75),
            done(&urls),
        ]);
        let job_id = controller.submit("a prompt").unwrap();

        assert_eq!(controller.poll_once(&job_id).unwrap(), JobPhase::Polling(10));
        assert_eq!(controller.poll_once(&job_id).unwrap(), JobPhase::Polling(40));
        assert_eq!(controller.poll_once(&job_id).unwrap(), JobPhase::Polling(75));

        let phase = controller.poll_once(&job_id).unwrap();
        assert_eq!(
            phase,
            JobPhase::Completed(urls.iter().map(|u| u.to_string()).collect())
        );
        assert_eq!(backend.poll_count(), 4);
        assert!(!controller.is_active());

        let images: Vec<String> =
            get_record(store.as_ref(), SessionKey::GeneratedImages).unwrap().unwrap();
        assert_eq!(images.len(), 2);

        let job: GenerationJob =
            get_record(store.as_ref(), SessionKey::GenerationJob).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.result_urls, images);
    }

    #[test]
    fn test_hundred_percent_without_images_is_protocol_violation() {
        let (controller, _, store) = controller(vec![done(&[])]);
        let job_id = controller.submit("a prompt").unwrap();

        let err = controller.poll_once(&job_id).unwrap_err();
        assert!(matches!(err, KioskError::ProtocolViolation));
        assert!(matches!(controller.phase(), JobPhase::Failed(_)));
        assert!(!controller.is_active());

        let job: GenerationJob =
            get_record(store.as_ref(), SessionKey::GenerationJob).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
    }

    #[test]
    fn test_poll_error_ends_polling_after_single_attempt() {
        let (controller, backend, _) = controller(vec![Err(KioskError::PollError(
            "network error: connection reset".to_string(),
        ))]);
        let job_id = controller.submit("a prompt").unwrap();

        let err = controller.poll_once(&job_id).unwrap_err();
        assert!(matches!(err, KioskError::PollError(_)));
        assert!(matches!(controller.phase(), JobPhase::Failed(_)));
        assert_eq!(backend.poll_count(), 1);
    }

    #[test]
    fn test_downward_percent_accepted_verbatim() {
        let (controller, _, _) = controller(vec![tick(60), tick(40)]);
        let job_id = controller.submit("a prompt").unwrap();

        assert_eq!(controller.poll_once(&job_id).unwrap(), JobPhase::Polling(60));
        assert_eq!(controller.poll_once(&job_id).unwrap(), JobPhase::Polling(40));
    }

    #[tokio::test]
    async fn test_run_drives_to_completion_with_events() {
        let urls = ["https://cdn.test/out.png"];
        let (controller, backend, _) =
            controller(vec![tick(30), tick(70), done(&urls)]);
        controller.submit("a prompt").unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::channel(16);
        let outcome = controller.run(Some(tx)).await.unwrap();
        assert_eq!(
            outcome,
            PollOutcome::Completed(vec!["https://cdn.test/out.png".to_string()])
        );
        assert_eq!(backend.poll_count(), 3);

        let mut percents = Vec::new();
        let mut completed = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                KioskEvent::GenerationProgress { percent } => percents.push(percent),
                KioskEvent::GenerationCompleted { image_urls } => {
                    completed = true;
                    assert_eq!(image_urls.len(), 1);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(percents, vec![30, 70]);
        assert!(completed);
    }

    #[tokio::test]
    async fn test_cancel_between_ticks_stops_polling() {
        let (controller, backend, _) = controller(vec![tick(10), tick(20), tick(30)]);
        let job_id = controller.submit("a prompt").unwrap();

        controller.poll_once(&job_id).unwrap();
        controller.cancel();

        let outcome = controller.run(None).await.unwrap();
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(backend.poll_count(), 1);
    }

    #[tokio::test]
    async fn test_run_without_submitted_job_is_missing_state() {
        let (controller, _, _) = controller(vec![]);
        let err = controller.run(None).await.unwrap_err();
        assert!(matches!(err, KioskError::MissingSessionState(_)));
    }
}
