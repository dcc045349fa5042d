pub mod backend;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod file_manager;
pub mod generation;
pub mod models;
pub mod prompt;
pub mod session;
pub mod steps;
pub mod utils;

pub use backend::{backend_from_config, GenerationBackend};
pub use capture::{frame_from_data_url, CameraSession, CapturedFrame, FrameSource};
pub use config::KioskConfig;
pub use error::KioskError;
pub use events::{EventSender, KioskEvent};
pub use generation::{JobController, JobPhase, PollOutcome};
pub use session::{FileSessionStore, MemorySessionStore, SessionKey, SessionStore};
pub use steps::{Step, StepEntry};

use std::sync::Arc;

/// One kiosk session's wiring: the durable store, the backend picked at
/// startup and the generation controller, shared by every step module.
pub struct KioskContext {
    pub config: KioskConfig,
    pub store: Arc<dyn SessionStore>,
    pub backend: Arc<dyn GenerationBackend>,
    pub controller: JobController,
}

impl KioskContext {
    /// Wires explicitly injected collaborators (tests, embedded shells).
    pub fn new(
        config: KioskConfig,
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        let controller = JobController::new(store.clone(), backend.clone(), config.poll_interval());
        Self {
            config,
            store,
            backend,
            controller,
        }
    }

    /// Production wiring: settings + environment config, data directories,
    /// catalog validation, file-backed store and the backend selected by
    /// the mock-mode toggle.
    pub fn initialize() -> Result<Self, KioskError> {
        Self::initialize_with(KioskConfig::load())
    }

    pub fn initialize_with(config: KioskConfig) -> Result<Self, KioskError> {
        config.validate()?;
        catalog::validate()?;
        utils::initialize_data_directories()?;
        file_manager::initialize_json_file(&utils::get_settings_json_path(), &KioskConfig::default())?;

        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::at_default_location());
        let backend = backend_from_config(&config);

        log::info!(
            "Retrato initialized against {} ({})",
            config.base_url,
            if config.use_mocks { "mock" } else { "http" }
        );
        Ok(Self::new(config, store, backend))
    }
}
