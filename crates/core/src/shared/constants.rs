/// Extensions accepted as audio input.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "m4a", "aac", "flac", "ogg", "oga", "opus", "wma", "aiff", "aif", "webm",
];

/// Largest audio file accepted for upload (400 MiB).
pub const MAX_AUDIO_FILE_BYTES: u64 = 400 * 1024 * 1024;

pub const TRANSCRIBE_PATH: &str = "/api/transcribe";

/// Environment variable consulted for the backend URL when no flag is given.
pub const BACKEND_URL_ENV: &str = "CLIPSCRIBE_BACKEND_URL";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
