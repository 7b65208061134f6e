use std::time::Duration;

use serde::Deserialize;

use crate::shared::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, TRANSCRIBE_PATH};
use crate::transcription::domain::transcription_client::{
    TranscriptionClient, TranscriptionError, TranscriptionRequest,
};

#[derive(Deserialize)]
struct TranscribeResponse {
    transcription: String,
}

/// Posts clips as `multipart/form-data` to `{backend_url}/api/transcribe`.
///
/// Form fields: `file` (the audio), `startTime` and `endTime` (`MM:SS`).
pub struct HttpTranscriptionClient {
    url: String,
    timeout: Duration,
}

impl HttpTranscriptionClient {
    pub fn new(backend_url: &str) -> Result<Self, TranscriptionError> {
        let base = backend_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(TranscriptionError::MissingBackendUrl);
        }
        Ok(Self {
            url: format!("{base}{TRANSCRIBE_PATH}"),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<reqwest::blocking::multipart::Form, TranscriptionError> {
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", &request.file)
            .map_err(|e| TranscriptionError::ReadFile {
                path: request.file.clone(),
                source: e,
            })?
            .text("startTime", request.start_time.clone())
            .text("endTime", request.end_time.clone());
        Ok(form)
    }

    fn request_error(&self, source: reqwest::Error) -> TranscriptionError {
        TranscriptionError::Request {
            url: self.url.clone(),
            source,
        }
    }
}

impl TranscriptionClient for HttpTranscriptionClient {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, TranscriptionError> {
        let form = self.build_form(request)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| self.request_error(e))?;

        log::info!(
            "Uploading {} ({}..{}) to {}",
            request.file.display(),
            request.start_time,
            request.end_time,
            self.url
        );
        let response = http
            .post(&self.url)
            .multipart(form)
            .send()
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.request_error(e))?;
        if !status.is_success() {
            log::error!("Backend error response ({status}): {body}");
            return Err(TranscriptionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = parse_response(&body)?;
        log::info!("Transcription received: {} characters", text.len());
        Ok(text)
    }
}

fn parse_response(body: &str) -> Result<String, TranscriptionError> {
    serde_json::from_str::<TranscribeResponse>(body)
        .map(|r| r.transcription)
        .map_err(|e| TranscriptionError::MalformedResponse(e.to_string()))
}
