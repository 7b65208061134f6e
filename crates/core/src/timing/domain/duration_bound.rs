use super::clock_time::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Upper limit for selectable times, in whole seconds.
///
/// Starts out `Unbounded` and becomes `Known` once the media duration has
/// been discovered for the loaded file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurationBound {
    #[default]
    Unbounded,
    Known(u64),
}

/// Largest hour, minute and second values a bound allows, split the same way
/// as [`ClockTime::from_seconds`](super::clock_time::ClockTime::from_seconds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxComponents {
    pub max_hours: u64,
    pub max_minutes: u32,
    pub max_seconds: u32,
}

impl DurationBound {
    /// Build a bound from a media duration in fractional seconds.
    ///
    /// The fraction is floored so the last selectable second never lies past
    /// the end of the file. Missing, negative or non-finite durations leave
    /// the bound unknown.
    pub fn from_media_seconds(duration: Option<f64>) -> Self {
        match duration {
            Some(secs) if secs.is_finite() && secs >= 0.0 => {
                DurationBound::Known(secs.floor() as u64)
            }
            _ => DurationBound::Unbounded,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, DurationBound::Known(_))
    }

    pub fn value(&self) -> Option<u64> {
        match self {
            DurationBound::Known(secs) => Some(*secs),
            DurationBound::Unbounded => None,
        }
    }

    pub fn value_or(&self, fallback: u64) -> u64 {
        self.value().unwrap_or(fallback)
    }

    /// An unknown bound is treated as zero, collapsing the hour selector to
    /// the single option `0`.
    pub fn max_components(&self) -> MaxComponents {
        let bound = self.value_or(0);
        MaxComponents {
            max_hours: bound / SECONDS_PER_HOUR,
            max_minutes: ((bound % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
            max_seconds: (bound % SECONDS_PER_MINUTE) as u32,
        }
    }
}
