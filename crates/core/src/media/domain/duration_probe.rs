use std::path::Path;

/// Domain interface for discovering the playback duration of a media file.
pub trait DurationProbe: Send {
    /// Duration in fractional seconds, or None if the container does not
    /// report one or the file has no audio track.
    fn probe_seconds(&self, path: &Path) -> Result<Option<f64>, Box<dyn std::error::Error>>;
}
