// Events pushed to whatever UI shell hosts the flow
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KioskEvent {
    UploadProgress { percent: u8 },
    GenerationSubmitted { job_id: String },
    GenerationProgress { percent: u8 },
    GenerationCompleted { image_urls: Vec<String> },
    GenerationFailed { message: String },
    PrintRecorded { copies: u32 },
}

pub type EventSender = mpsc::Sender<KioskEvent>;

/// Best-effort emission; a slow or absent UI never stalls the flow.
pub fn emit(events: &Option<EventSender>, event: KioskEvent) {
    if let Some(tx) = events {
        let _ = tx.try_send(event);
    }
}
