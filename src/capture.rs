// Camera capture seam
//
// The device driver lives in the hosting shell; the flow engine only sees
// a source of still frames. The session wrapper guarantees the underlying
// stream is released on every exit path, including drops on error.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::KioskError;

pub const CAPTURE_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// A live camera stream that can produce still frames.
pub trait FrameSource: Send {
    fn capture_still(&mut self) -> Result<Vec<u8>, KioskError>;
    /// Stop the underlying device stream. Must be safe to call twice.
    fn release(&mut self);
}

/// Scoped ownership of a camera stream for the capture screen.
pub struct CameraSession {
    source: Box<dyn FrameSource>,
    released: bool,
}

impl CameraSession {
    pub fn open(source: Box<dyn FrameSource>) -> Self {
        Self {
            source,
            released: false,
        }
    }

    /// Grabs one still frame; the stream stays live so the user can retake.
    pub fn take_still(&mut self) -> Result<CapturedFrame, KioskError> {
        if self.released {
            return Err(KioskError::InvalidFrame(
                "camera stream already released".to_string(),
            ));
        }
        let bytes = self.source.capture_still()?;
        if bytes.is_empty() {
            return Err(KioskError::InvalidFrame("empty frame from camera".to_string()));
        }
        Ok(CapturedFrame {
            bytes,
            content_type: CAPTURE_CONTENT_TYPE,
        })
    }

    pub fn release(&mut self) {
        if !self.released {
            self.source.release();
            self.released = true;
            log::debug!("Camera stream released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.release();
    }
}

/// Decodes capture input that arrives as a `data:image/...;base64,` URL
/// (or as a bare base64 string) into raw image bytes.
pub fn frame_from_data_url(data_url: &str) -> Result<Vec<u8>, KioskError> {
    let payload = match data_url.split_once("base64,") {
        Some((header, rest)) if header.starts_with("data:image/") => rest,
        _ => data_url,
    };

    BASE64
        .decode(payload.trim())
        .map_err(|e| KioskError::InvalidFrame(format!("base64 decode failed: {}", e)))
}
