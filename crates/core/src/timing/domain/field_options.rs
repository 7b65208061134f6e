use std::ops::RangeInclusive;

use super::clock_time::ClockTime;
use super::duration_bound::DurationBound;

const FULL_RANGE: RangeInclusive<u32> = 0..=59;

/// Selectable values for the hour, minute and second fields of one endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldOptions {
    pub hours: RangeInclusive<u64>,
    pub minutes: RangeInclusive<u32>,
    pub seconds: RangeInclusive<u32>,
}

impl FieldOptions {
    pub fn admits(&self, time: &ClockTime) -> bool {
        self.hours.contains(&time.hours())
            && self.minutes.contains(&time.minutes())
            && self.seconds.contains(&time.seconds())
    }

    pub fn hour_labels(&self) -> Vec<String> {
        self.hours.clone().map(option_label).collect()
    }

    pub fn minute_labels(&self) -> Vec<String> {
        self.minutes.clone().map(option_label).collect()
    }

    pub fn second_labels(&self) -> Vec<String> {
        self.seconds.clone().map(option_label).collect()
    }
}

/// Derive the option ranges for a selector currently showing `hour` and
/// `minute`.
///
/// Minutes only shrink when the hour sits at the bound's hour, and seconds
/// only shrink when both hour and minute sit at the bound. With no known
/// bound, hours collapse to `0` while minutes and seconds keep `0..=59`.
pub fn derive_options(hour: u64, minute: u32, bound: DurationBound) -> FieldOptions {
    if !bound.is_known() {
        return FieldOptions {
            hours: 0..=0,
            minutes: FULL_RANGE,
            seconds: FULL_RANGE,
        };
    }

    let max = bound.max_components();
    let mut minutes = FULL_RANGE;
    let mut seconds = FULL_RANGE;
    if hour == max.max_hours {
        minutes = 0..=max.max_minutes;
        if minute == max.max_minutes {
            seconds = 0..=max.max_seconds;
        }
    }

    FieldOptions {
        hours: 0..=max.max_hours,
        minutes,
        seconds,
    }
}

/// Options that admit `time` itself, derived from its own hour and minute.
pub fn options_for(time: &ClockTime, bound: DurationBound) -> FieldOptions {
    derive_options(time.hours(), time.minutes(), bound)
}

/// Display label for a selector option: zero-padded to two digits.
pub fn option_label(value: impl Into<u64>) -> String {
    format!("{:02}", value.into())
}
