use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected HH:MM:SS with three components, got {count} in '{input}'")]
    ComponentCount { input: String, count: usize },
    #[error("invalid component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },
}

/// A clock time (hours, minutes, seconds) not tied to any day or timezone.
///
/// Parsing is structural only; whether the components fit a duration bound
/// is decided by the time range coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hours: u64,
    minutes: u32,
    seconds: u32,
}

impl ClockTime {
    pub const ZERO: ClockTime = ClockTime::new(0, 0, 0);

    pub const fn new(hours: u64, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / SECONDS_PER_HOUR,
            minutes: ((total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
            seconds: (total % SECONDS_PER_MINUTE) as u32,
        }
    }

    pub fn to_seconds(&self) -> u64 {
        self.hours * SECONDS_PER_HOUR
            + u64::from(self.minutes) * SECONDS_PER_MINUTE
            + u64::from(self.seconds)
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn with_hours(self, hours: u64) -> Self {
        Self { hours, ..self }
    }

    pub fn with_minutes(self, minutes: u32) -> Self {
        Self { minutes, ..self }
    }

    pub fn with_seconds(self, seconds: u32) -> Self {
        Self { seconds, ..self }
    }

    /// Render as `MM:SS`, folding hours into the minute count.
    ///
    /// This is the format the transcription backend expects for
    /// `startTime` / `endTime`.
    pub fn to_compact_minutes_seconds(&self) -> String {
        let total = self.to_seconds();
        format!(
            "{:02}:{:02}",
            total / SECONDS_PER_MINUTE,
            total % SECONDS_PER_MINUTE
        )
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for ClockTime {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(FormatError::ComponentCount {
                input: s.to_string(),
                count: parts.len(),
            });
        }

        let component = |part: &str| -> Result<u64, FormatError> {
            // u64::from_str accepts a leading '+', which is not a clock digit.
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FormatError::InvalidComponent {
                    input: s.to_string(),
                    component: part.to_string(),
                });
            }
            part.parse().map_err(|_| FormatError::InvalidComponent {
                input: s.to_string(),
                component: part.to_string(),
            })
        };

        let invalid = |part: &str| FormatError::InvalidComponent {
            input: s.to_string(),
            component: part.to_string(),
        };
        // Hours beyond this would overflow the flattened seconds count.
        let hours = component(parts[0])?;
        if hours > u64::MAX / SECONDS_PER_HOUR {
            return Err(invalid(parts[0]));
        }
        let minutes = u32::try_from(component(parts[1])?).map_err(|_| invalid(parts[1]))?;
        let seconds = u32::try_from(component(parts[2])?).map_err(|_| invalid(parts[2]))?;
        Ok(Self::new(hours, minutes, seconds))
    }
}
