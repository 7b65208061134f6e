use std::path::Path;

use thiserror::Error;

use crate::media::domain::audio_file::AudioFile;
use crate::media::domain::duration_probe::DurationProbe;
use crate::timing::domain::clock_time::ClockTime;
use crate::timing::domain::duration_bound::DurationBound;
use crate::timing::domain::time_range::{EndAdvancePolicy, Endpoint, TimeRange};
use crate::transcription::domain::transcription_client::{
    TranscriptionClient, TranscriptionRequest,
};

#[derive(Error, Debug, PartialEq)]
pub enum ClipError {
    #[error("{endpoint} time {time} is outside the audio duration ({bound:?})")]
    OutOfRange {
        endpoint: Endpoint,
        time: ClockTime,
        bound: DurationBound,
    },
    #[error("start {start} must be before end {end}")]
    EmptyRange { start: ClockTime, end: ClockTime },
}

/// Result of a successful transcription, with the range that was sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipTranscription {
    pub start: ClockTime,
    pub end: ClockTime,
    pub text: String,
}

/// Accepts an audio file, bounds the requested range by its duration and
/// submits the clip for transcription.
pub struct TranscribeClipUseCase {
    probe: Box<dyn DurationProbe>,
    client: Box<dyn TranscriptionClient>,
    policy: EndAdvancePolicy,
}

impl TranscribeClipUseCase {
    pub fn new(
        probe: Box<dyn DurationProbe>,
        client: Box<dyn TranscriptionClient>,
        policy: EndAdvancePolicy,
    ) -> Self {
        Self {
            probe,
            client,
            policy,
        }
    }

    /// Accept the file, discover its duration and apply the requested
    /// endpoints through the range coordinator, start first.
    pub fn prepare(
        &self,
        path: &Path,
        start: Option<ClockTime>,
        end: Option<ClockTime>,
    ) -> Result<(AudioFile, TimeRange), Box<dyn std::error::Error>> {
        prepare_clip(self.probe.as_ref(), path, self.policy, start, end)
    }

    pub fn execute(
        &self,
        path: &Path,
        start: Option<ClockTime>,
        end: Option<ClockTime>,
    ) -> Result<ClipTranscription, Box<dyn std::error::Error>> {
        let (file, range) = self.prepare(path, start, end)?;
        if range.start().to_seconds() >= range.end().to_seconds() {
            return Err(ClipError::EmptyRange {
                start: range.start(),
                end: range.end(),
            }
            .into());
        }

        let request = TranscriptionRequest::from_range(file.path(), &range);
        let text = self.client.transcribe(&request)?;
        Ok(ClipTranscription {
            start: range.start(),
            end: range.end(),
            text,
        })
    }
}

/// Validate the file and build its bounded range without submitting it.
pub fn prepare_clip(
    probe: &dyn DurationProbe,
    path: &Path,
    policy: EndAdvancePolicy,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
) -> Result<(AudioFile, TimeRange), Box<dyn std::error::Error>> {
    let file = AudioFile::accept(path)?;
    let range = build_range(probe, &file, policy, start, end)?;
    Ok((file, range))
}

fn build_range(
    probe: &dyn DurationProbe,
    file: &AudioFile,
    policy: EndAdvancePolicy,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
) -> Result<TimeRange, ClipError> {
    // A file whose duration cannot be read is still uploadable; the range
    // simply stays unbounded, as it does before metadata arrives.
    let duration = match probe.probe_seconds(file.path()) {
        Ok(duration) => duration,
        Err(e) => {
            log::warn!("could not read duration of {}: {e}", file.path().display());
            None
        }
    };
    let bound = DurationBound::from_media_seconds(duration);
    log::info!("{}: duration bound {:?}", file.file_name(), bound);

    let mut range = TimeRange::with_policy(policy);
    range.on_bound_discovered(bound);

    for (endpoint, requested) in [(Endpoint::Start, start), (Endpoint::End, end)] {
        let Some(time) = requested else { continue };
        if !range.admits(&time) {
            return Err(ClipError::OutOfRange {
                endpoint,
                time,
                bound,
            });
        }
        match endpoint {
            Endpoint::Start => range.set_start(time),
            Endpoint::End => range.set_end(time),
        }
    }
    Ok(range)
}
