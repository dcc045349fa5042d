// Mock backend for offline/dev kiosks: simulates every endpoint locally
// with synthetic delays and synthetic progress increments.
use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

use super::{GenerationBackend, SaveSelectionResponse};
use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::models::{PhotoRecord, ProgressSnapshot};

const UPLOAD_STEPS: u8 = 10;

pub struct MockBackend {
    storage_base: String,
    result_count: usize,
    delay: Duration,
    progress: Mutex<HashMap<String, u8>>,
    uploaded_url: Mutex<Option<String>>,
}

impl MockBackend {
    pub fn new(config: &KioskConfig) -> Self {
        Self::with_delay(config, Duration::from_millis(200))
    }

    /// Zero-delay variant for tests.
    pub fn with_delay(config: &KioskConfig, delay: Duration) -> Self {
        Self {
            storage_base: config.photo_storage_base.trim_end_matches('/').to_string(),
            result_count: config.result_count,
            delay,
            progress: Mutex::new(HashMap::new()),
            uploaded_url: Mutex::new(None),
        }
    }

    fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

impl GenerationBackend for MockBackend {
    fn upload_photo(
        &self,
        image: &[u8],
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<PhotoRecord, KioskError> {
        log::debug!("Mock upload of {} bytes", image.len());

        for step in 1..=UPLOAD_STEPS {
            self.simulate_latency();
            on_progress(step * 10);
        }

        let name = format!("foto_{}.jpg", chrono::Utc::now().timestamp_millis());
        let original_url = format!("{}/{}", self.storage_base, name);
        *self.uploaded_url.lock() = Some(original_url.clone());

        Ok(PhotoRecord {
            id: rand::thread_rng().gen_range(1..1000),
            nome: name,
            original_url,
            ia_url: None,
            quantidade: 0,
            impressa: false,
        })
    }

    fn submit_generation(&self, prompt: &str) -> Result<String, KioskError> {
        self.simulate_latency();
        let task_id = format!("task_{}", uuid::Uuid::new_v4().simple());
        self.progress.lock().insert(task_id.clone(), 0);
        log::debug!("Mock generation submitted ({} char prompt): {}", prompt.len(), task_id);
        Ok(task_id)
    }

    fn poll_progress(&self, job_id: &str) -> Result<ProgressSnapshot, KioskError> {
        self.simulate_latency();

        let mut progress = self.progress.lock();
        let current = *progress
            .get(job_id)
            .ok_or_else(|| KioskError::PollError(format!("unknown task '{}'", job_id)))?;

        let advanced = current
            .saturating_add(rand::thread_rng().gen_range(10..30))
            .min(100);
        progress.insert(job_id.to_string(), advanced);

        if advanced < 100 {
            return Ok(ProgressSnapshot {
                progress: advanced,
                image_urls: None,
            });
        }

        let uploaded = self.uploaded_url.lock().clone();
        let image_urls = (1..=self.result_count)
            .map(|index| match &uploaded {
                Some(url) => url.clone(),
                None => format!("{}/mock-{}-{}.png", self.storage_base, job_id, index),
            })
            .collect();

        Ok(ProgressSnapshot {
            progress: 100,
            image_urls: Some(image_urls),
        })
    }

    fn save_selection(
        &self,
        photo_name: &str,
        image_url: &str,
    ) -> Result<SaveSelectionResponse, KioskError> {
        self.simulate_latency();
        log::debug!("Mock save of {} for '{}'", image_url, photo_name);
        // No ia_url: callers fall back to the selected source URL.
        Ok(SaveSelectionResponse { ia_url: None })
    }

    fn set_print_count(&self, photo_name: &str, copies: u32) -> Result<PhotoRecord, KioskError> {
        self.simulate_latency();
        Ok(PhotoRecord {
            id: 1,
            nome: photo_name.to_string(),
            original_url: format!("{}/{}.png", self.storage_base, photo_name),
            ia_url: Some(format!("{}/{}IA.png", self.storage_base, photo_name)),
            quantidade: copies,
            impressa: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> MockBackend {
        MockBackend::with_delay(&KioskConfig::default(), Duration::ZERO)
    }

    #[test]
    fn test_upload_reports_steps_to_one_hundred() {
        let backend = mock();
        let mut seen = Vec::new();
        let record = backend
            .upload_photo(b"jpeg-bytes", &mut |p| seen.push(p))
            .unwrap();

        assert_eq!(seen, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert!(record.nome.starts_with("foto_"));
        assert!(record.nome.ends_with(".jpg"));
        assert!(record.original_url.contains(&record.nome));
    }

    #[test]
    fn test_generation_reaches_completion_with_result_images() {
        let backend = mock();
        let uploaded = backend.upload_photo(b"jpeg", &mut |_| {}).unwrap();
        let task_id = backend.submit_generation("a prompt").unwrap();

        let mut last = ProgressSnapshot {
            progress: 0,
            image_urls: None,
        };
        for _ in 0..12 {
            last = backend.poll_progress(&task_id).unwrap();
            if last.progress == 100 {
                break;
            }
            assert!(last.image_urls.is_none());
        }

        assert_eq!(last.progress, 100);
        let urls = last.image_urls.unwrap();
        assert_eq!(urls.len(), 4);
        assert!(urls.iter().all(|u| *u == uploaded.original_url));
    }

    #[test]
    fn test_poll_of_unknown_task_fails() {
        let backend = mock();
        assert!(matches!(
            backend.poll_progress("task_missing"),
            Err(KioskError::PollError(_))
        ));
    }

    #[test]
    fn test_save_omits_ia_url() {
        let backend = mock();
        let response = backend.save_selection("foto1", "https://cdn.test/a.png").unwrap();
        assert!(response.ia_url.is_none());
    }

    #[test]
    fn test_print_count_marks_printed() {
        let backend = mock();
        let record = backend.set_print_count("foto7", 1).unwrap();
        assert_eq!(record.quantidade, 1);
        assert!(record.impressa);
        assert_eq!(record.nome, "foto7");
    }
}
