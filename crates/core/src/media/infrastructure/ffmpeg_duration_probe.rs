use std::path::Path;

use crate::media::domain::duration_probe::DurationProbe;

/// Reads container or stream duration with ffmpeg-next, without decoding.
pub struct FfmpegDurationProbe;

impl DurationProbe for FfmpegDurationProbe {
    fn probe_seconds(&self, path: &Path) -> Result<Option<f64>, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let audio_stream = match ictx.streams().best(ffmpeg_next::media::Type::Audio) {
            Some(stream) => stream,
            None => return Ok(None),
        };

        // Container duration is in AV_TIME_BASE units; AV_NOPTS_VALUE is negative.
        let container = ictx.duration();
        if container > 0 {
            let secs = container as f64 / ffmpeg_next::ffi::AV_TIME_BASE as f64;
            log::debug!("{}: container duration {secs:.3}s", path.display());
            return Ok(Some(secs));
        }

        let stream_duration = audio_stream.duration();
        if stream_duration > 0 {
            let secs = stream_duration as f64 * f64::from(audio_stream.time_base());
            log::debug!("{}: stream duration {secs:.3}s", path.display());
            return Ok(Some(secs));
        }

        log::warn!("{}: no duration reported", path.display());
        Ok(None)
    }
}
