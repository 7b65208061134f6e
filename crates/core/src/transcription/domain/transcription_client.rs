use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::timing::domain::time_range::TimeRange;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("no backend URL configured")]
    MissingBackendUrl,
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A clip of an audio file to transcribe, with both ends already in the
/// compact `MM:SS` wire format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub file: PathBuf,
    pub start_time: String,
    pub end_time: String,
}

impl TranscriptionRequest {
    pub fn from_range(file: &Path, range: &TimeRange) -> Self {
        let (start_time, end_time) = range.compact_fields();
        Self {
            file: file.to_path_buf(),
            start_time,
            end_time,
        }
    }
}

/// Domain interface for submitting a clip to a remote transcription service.
pub trait TranscriptionClient: Send {
    fn transcribe(&self, request: &TranscriptionRequest) -> Result<String, TranscriptionError>;
}
