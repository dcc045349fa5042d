// HTTP backend client
use std::io::{Cursor, Read};

use super::{GenerationBackend, SaveSelectionResponse, SubmitResponse};
use crate::capture::CAPTURE_CONTENT_TYPE;
use crate::config::KioskConfig;
use crate::error::KioskError;
use crate::models::{PhotoRecord, ProgressSnapshot};

pub struct HttpBackend {
    config: KioskConfig,
}

impl HttpBackend {
    pub fn new(config: KioskConfig) -> Self {
        Self { config }
    }
}

fn error_text(error: ureq::Error) -> String {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response
                .into_string()
                .unwrap_or_else(|_| "unknown error".to_string());
            format!("server error {}: {}", code, body)
        }
        other => format!("network error: {}", other),
    }
}

fn handle_response<T: serde::de::DeserializeOwned>(
    response: ureq::Response,
) -> Result<T, String> {
    let status = response.status();
    if (200..300).contains(&status) {
        response
            .into_json::<T>()
            .map_err(|e| format!("failed to parse response: {}", e))
    } else {
        let error_body = response
            .into_string()
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(format!("server error {}: {}", status, error_body))
    }
}

/// Counts bytes as ureq drains the multipart body, mapping them to 0-100.
struct ProgressReader<'a> {
    inner: Cursor<Vec<u8>>,
    total: usize,
    sent: usize,
    on_progress: &'a mut dyn FnMut(u8),
}

impl<'a> ProgressReader<'a> {
    fn new(body: Vec<u8>, on_progress: &'a mut dyn FnMut(u8)) -> Self {
        let total = body.len();
        Self {
            inner: Cursor::new(body),
            total,
            sent: 0,
            on_progress,
        }
    }
}

impl Read for ProgressReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 && self.total > 0 {
            self.sent += n;
            let percent = (self.sent * 100 / self.total) as u8;
            (self.on_progress)(percent);
        }
        Ok(n)
    }
}

fn multipart_body(boundary: &str, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(image.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"photo.jpg\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", CAPTURE_CONTENT_TYPE).as_bytes());
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

impl GenerationBackend for HttpBackend {
    fn upload_photo(
        &self,
        image: &[u8],
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<PhotoRecord, KioskError> {
        let url = self.config.api_url("/photos/upload");
        let boundary = format!("retrato-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_body(&boundary, image);
        let content_length = body.len();

        log::debug!("Uploading {} byte photo to {}", image.len(), url);
        on_progress(0);

        let response = ureq::post(&url)
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", boundary),
            )
            .set("Content-Length", &content_length.to_string())
            .send(ProgressReader::new(body, on_progress))
            .map_err(|e| KioskError::UploadFailed(error_text(e)))?;

        let record: PhotoRecord = handle_response(response).map_err(KioskError::UploadFailed)?;
        log::info!("Uploaded photo '{}' (id {})", record.nome, record.id);
        Ok(record)
    }

    fn submit_generation(&self, prompt: &str) -> Result<String, KioskError> {
        let url = self.config.api_url("/generate");
        log::debug!("Submitting generation job ({} char prompt)", prompt.len());

        let response = ureq::post(&url)
            .send_json(serde_json::json!({ "prompt": prompt }))
            .map_err(|e| KioskError::SubmissionFailed(error_text(e)))?;

        let submit: SubmitResponse =
            handle_response(response).map_err(KioskError::SubmissionFailed)?;
        if submit.task_id.trim().is_empty() {
            return Err(KioskError::SubmissionFailed(
                "backend returned an empty task id".to_string(),
            ));
        }
        log::info!("Generation job submitted: {}", submit.task_id);
        Ok(submit.task_id)
    }

    fn poll_progress(&self, job_id: &str) -> Result<ProgressSnapshot, KioskError> {
        let url = self.config.api_url(&format!("/progress/{}", job_id));

        let response = ureq::get(&url)
            .call()
            .map_err(|e| KioskError::PollError(error_text(e)))?;

        handle_response(response).map_err(KioskError::PollError)
    }

    fn save_selection(
        &self,
        photo_name: &str,
        image_url: &str,
    ) -> Result<SaveSelectionResponse, KioskError> {
        let url = self.config.api_url(&format!("/photos/{}/save-ia", photo_name));
        log::debug!("Saving selected image for '{}'", photo_name);

        let response = ureq::post(&url)
            .send_json(serde_json::json!({ "image_url": image_url }))
            .map_err(|e| KioskError::SaveFailed(error_text(e)))?;

        handle_response(response).map_err(KioskError::SaveFailed)
    }

    fn set_print_count(&self, photo_name: &str, copies: u32) -> Result<PhotoRecord, KioskError> {
        let url = self.config.api_url(&format!("/photos/{}/quantidade", photo_name));
        log::debug!("Recording {} print copies for '{}'", copies, photo_name);

        let response = ureq::request("PATCH", &url)
            .send_json(serde_json::json!({ "quantidade": copies }))
            .map_err(|e| KioskError::PrintUpdateFailed(error_text(e)))?;

        handle_response(response).map_err(KioskError::PrintUpdateFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_body_framing() {
        let body = multipart_body("retrato-abc", b"JPEGDATA");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("--retrato-abc\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"photo.jpg\""));
        assert!(text.contains("Content-Type: image/jpeg"));
        assert!(text.contains("JPEGDATA"));
        assert!(text.ends_with("\r\n--retrato-abc--\r\n"));
    }

    #[test]
    fn test_progress_reader_reaches_one_hundred() {
        let mut seen = Vec::new();
        let mut record = |p: u8| seen.push(p);
        let mut reader = ProgressReader::new(vec![0u8; 4096], &mut record);

        let mut sink = Vec::new();
        reader.read_to_end(&mut sink).unwrap();

        assert_eq!(sink.len(), 4096);
        assert_eq!(seen.last().copied(), Some(100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }
}
