use std::fmt;

use serde::{Deserialize, Serialize};

use super::clock_time::ClockTime;
use super::duration_bound::DurationBound;
use super::field_options::{derive_options, options_for, FieldOptions};

pub const DEFAULT_START: ClockTime = ClockTime::ZERO;
pub const DEFAULT_END: ClockTime = ClockTime::new(0, 10, 0);

/// How far the end marker is pushed past a start edit that reaches it.
pub const END_ADVANCE_WINDOW_SECONDS: u64 = 600;

/// Where the end marker goes when a start edit reaches it before the
/// duration is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndAdvancePolicy {
    /// Clamp to `min(start + window, 0)`, collapsing the end to 00:00:00.
    #[default]
    ClampToZero,
    /// Keep the full window: end = start + window.
    KeepWindow,
}

impl EndAdvancePolicy {
    pub const ALL: &[EndAdvancePolicy] = &[
        EndAdvancePolicy::ClampToZero,
        EndAdvancePolicy::KeepWindow,
    ];

    pub fn advanced_end(self, start_seconds: u64, bound: DurationBound) -> u64 {
        let target = start_seconds + END_ADVANCE_WINDOW_SECONDS;
        match (bound, self) {
            (DurationBound::Known(max), _) => target.min(max),
            (DurationBound::Unbounded, EndAdvancePolicy::ClampToZero) => 0,
            (DurationBound::Unbounded, EndAdvancePolicy::KeepWindow) => target,
        }
    }
}

impl fmt::Display for EndAdvancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndAdvancePolicy::ClampToZero => write!(f, "clamp-to-zero"),
            EndAdvancePolicy::KeepWindow => write!(f, "keep-window"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// No duration yet: hours pinned to 0, minutes and seconds unrestricted.
    Unbounded,
    /// Options follow the discovered duration.
    Bounded,
}

/// Start and end selectors sharing one duration bound.
///
/// Every mutation recomputes both endpoints' option sets before returning,
/// so the options never lag behind the values they describe. Values passed
/// in directly must lie within the options derived for them; anything else
/// is caller misuse and panics.
#[derive(Debug, Clone)]
pub struct TimeRange {
    start: ClockTime,
    end: ClockTime,
    bound: DurationBound,
    policy: EndAdvancePolicy,
    start_options: FieldOptions,
    end_options: FieldOptions,
}

impl TimeRange {
    pub fn new() -> Self {
        Self::with_policy(EndAdvancePolicy::default())
    }

    pub fn with_policy(policy: EndAdvancePolicy) -> Self {
        let bound = DurationBound::Unbounded;
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            bound,
            policy,
            start_options: options_for(&DEFAULT_START, bound),
            end_options: options_for(&DEFAULT_END, bound),
        }
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn bound(&self) -> DurationBound {
        self.bound
    }

    pub fn policy(&self) -> EndAdvancePolicy {
        self.policy
    }

    pub fn value(&self, endpoint: Endpoint) -> ClockTime {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub fn options(&self, endpoint: Endpoint) -> &FieldOptions {
        match endpoint {
            Endpoint::Start => &self.start_options,
            Endpoint::End => &self.end_options,
        }
    }

    /// Whether `time` could be selected through the fields under the current
    /// bound.
    pub fn admits(&self, time: &ClockTime) -> bool {
        options_for(time, self.bound).admits(time)
    }

    /// Per-endpoint so callers can drive each selector independently. Both
    /// endpoints share one bound, so today they always report the same state.
    pub fn state(&self, _endpoint: Endpoint) -> EndpointState {
        if self.bound.is_known() {
            EndpointState::Bounded
        } else {
            EndpointState::Unbounded
        }
    }

    /// Set the start time, advancing the end marker when the new start
    /// reaches or passes it.
    pub fn set_start(&mut self, new_start: ClockTime) {
        self.assert_selectable(Endpoint::Start, &new_start);

        if new_start.to_seconds() >= self.end.to_seconds() {
            let advanced = self.policy.advanced_end(new_start.to_seconds(), self.bound);
            let new_end = ClockTime::from_seconds(advanced);
            log::debug!(
                "start {new_start} reached end {}, advancing end to {new_end} ({})",
                self.end,
                self.policy
            );
            self.end = new_end;
        }
        self.start = new_start;
        self.refresh_options();
    }

    /// Set the end time. Never moves the start.
    pub fn set_end(&mut self, new_end: ClockTime) {
        self.assert_selectable(Endpoint::End, &new_end);
        self.end = new_end;
        self.refresh_options();
    }

    /// Record the media duration. Current values are kept as they are, even
    /// when they now lie past the bound.
    pub fn on_bound_discovered(&mut self, bound: DurationBound) {
        if self.bound != bound {
            log::info!("duration bound changed: {:?} -> {:?}", self.bound, bound);
        }
        self.bound = bound;
        self.refresh_options();
        if let Some(max) = bound.value() {
            if self.start.to_seconds() > max || self.end.to_seconds() > max {
                log::warn!(
                    "range {}..{} extends past the {max}s duration",
                    self.start,
                    self.end
                );
            }
        }
    }

    /// Select an hour on one endpoint's hour field. Lower fields are clamped
    /// into the recomputed options.
    pub fn select_hour(&mut self, endpoint: Endpoint, hour: u64) {
        assert!(
            self.options(endpoint).hours.contains(&hour),
            "hour {hour} is not a {endpoint} option ({:?})",
            self.options(endpoint).hours
        );
        let next = clamp_to_bound(self.value(endpoint).with_hours(hour), self.bound);
        self.set(endpoint, next);
    }

    pub fn select_minute(&mut self, endpoint: Endpoint, minute: u32) {
        assert!(
            self.options(endpoint).minutes.contains(&minute),
            "minute {minute} is not a {endpoint} option ({:?})",
            self.options(endpoint).minutes
        );
        let next = clamp_to_bound(self.value(endpoint).with_minutes(minute), self.bound);
        self.set(endpoint, next);
    }

    pub fn select_second(&mut self, endpoint: Endpoint, second: u32) {
        assert!(
            self.options(endpoint).seconds.contains(&second),
            "second {second} is not a {endpoint} option ({:?})",
            self.options(endpoint).seconds
        );
        let next = clamp_to_bound(self.value(endpoint).with_seconds(second), self.bound);
        self.set(endpoint, next);
    }

    /// `(startTime, endTime)` in the compact `MM:SS` wire format.
    pub fn compact_fields(&self) -> (String, String) {
        (
            self.start.to_compact_minutes_seconds(),
            self.end.to_compact_minutes_seconds(),
        )
    }

    fn set(&mut self, endpoint: Endpoint, time: ClockTime) {
        match endpoint {
            Endpoint::Start => self.set_start(time),
            Endpoint::End => self.set_end(time),
        }
    }

    fn refresh_options(&mut self) {
        self.start_options = options_for(&self.start, self.bound);
        self.end_options = options_for(&self.end, self.bound);
    }

    fn assert_selectable(&self, endpoint: Endpoint, time: &ClockTime) {
        assert!(
            self.admits(time),
            "{endpoint} time {time} is outside the selectable range for {:?}",
            self.bound
        );
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull each field into the options derived for the fields above it, hour
/// first, then minute, then second.
fn clamp_to_bound(time: ClockTime, bound: DurationBound) -> ClockTime {
    let hours = derive_options(time.hours(), time.minutes(), bound).hours;
    let time = time.with_hours(time.hours().min(*hours.end()));
    let minutes = derive_options(time.hours(), time.minutes(), bound).minutes;
    let time = time.with_minutes(time.minutes().min(*minutes.end()));
    let seconds = derive_options(time.hours(), time.minutes(), bound).seconds;
    time.with_seconds(time.seconds().min(*seconds.end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bounded(secs: u64) -> TimeRange {
        let mut range = TimeRange::new();
        range.on_bound_discovered(DurationBound::Known(secs));
        range
    }

    #[test]
    fn test_defaults() {
        let range = TimeRange::new();
        assert_eq!(range.start(), ClockTime::new(0, 0, 0));
        assert_eq!(range.end(), ClockTime::new(0, 10, 0));
        assert_eq!(range.bound(), DurationBound::Unbounded);
        assert_eq!(range.policy(), EndAdvancePolicy::ClampToZero);
        assert_eq!(range.state(Endpoint::Start), EndpointState::Unbounded);
        assert_eq!(range.state(Endpoint::End), EndpointState::Unbounded);
    }

    #[test]
    fn test_unbounded_options_pin_hours_only() {
        let range = TimeRange::new();
        for endpoint in [Endpoint::Start, Endpoint::End] {
            let opts = range.options(endpoint);
            assert_eq!(opts.hours, 0..=0);
            assert_eq!(opts.minutes, 0..=59);
            assert_eq!(opts.seconds, 0..=59);
        }
    }

    #[test]
    fn test_start_past_end_advances_end_by_window() {
        let mut range = bounded(3600);
        range.set_start(ClockTime::from_seconds(700));
        assert_eq!(range.start(), ClockTime::from_seconds(700));
        assert_eq!(range.end(), ClockTime::from_seconds(1300));
        assert_eq!(range.end().to_string(), "00:21:40");
    }

    #[test]
    fn test_start_equal_to_end_advances_end() {
        let mut range = bounded(3600);
        range.set_start(ClockTime::new(0, 10, 0));
        assert_eq!(range.end(), ClockTime::new(0, 20, 0));
    }

    #[test]
    fn test_start_before_end_leaves_end_alone() {
        let mut range = bounded(3600);
        range.set_start(ClockTime::from_seconds(599));
        assert_eq!(range.end(), ClockTime::new(0, 10, 0));
    }

    #[test]
    fn test_advanced_end_clamps_to_bound() {
        let mut range = bounded(1000);
        range.set_start(ClockTime::from_seconds(900));
        assert_eq!(range.end(), ClockTime::from_seconds(1000));
        assert!(range.start().to_seconds() < range.end().to_seconds());
    }

    #[test]
    fn test_start_edit_recomputes_end_options() {
        let mut range = bounded(1000);
        range.set_start(ClockTime::from_seconds(900));
        // end advanced to 00:16:40, the bound itself
        let end = range.options(Endpoint::End);
        assert_eq!(end.hours, 0..=0);
        assert_eq!(end.minutes, 0..=16);
        assert_eq!(end.seconds, 0..=40);

        let start = range.options(Endpoint::Start);
        assert_eq!(start.minutes, 0..=16);
        assert_eq!(start.seconds, 0..=59);
    }

    #[test]
    fn test_start_at_bound_collapses_range() {
        let mut range = bounded(1000);
        range.set_start(ClockTime::from_seconds(1000));
        assert_eq!(range.start(), range.end());
    }

    #[rstest]
    #[case::clamp_to_zero(EndAdvancePolicy::ClampToZero, ClockTime::ZERO)]
    #[case::keep_window(EndAdvancePolicy::KeepWindow, ClockTime::new(0, 25, 0))]
    fn test_unbounded_end_advance_follows_policy(
        #[case] policy: EndAdvancePolicy,
        #[case] expected_end: ClockTime,
    ) {
        let mut range = TimeRange::with_policy(policy);
        range.set_start(ClockTime::new(0, 15, 0));
        assert_eq!(range.start(), ClockTime::new(0, 15, 0));
        assert_eq!(range.end(), expected_end);
    }

    #[rstest]
    #[case(DurationBound::Unbounded)]
    #[case(DurationBound::Known(3725))]
    fn test_set_end_never_moves_start(#[case] bound: DurationBound) {
        let mut range = TimeRange::new();
        range.on_bound_discovered(bound);
        range.set_start(ClockTime::new(0, 5, 0));
        for end in [
            ClockTime::new(0, 0, 0),
            ClockTime::new(0, 4, 59),
            ClockTime::new(0, 5, 0),
            ClockTime::new(0, 30, 0),
        ] {
            range.set_end(end);
            assert_eq!(range.start(), ClockTime::new(0, 5, 0));
            assert_eq!(range.end(), end);
        }
    }

    #[test]
    fn test_bound_discovery_keeps_out_of_range_values() {
        let mut range = TimeRange::new();
        range.set_end(ClockTime::new(0, 45, 0));
        range.on_bound_discovered(DurationBound::Known(600));
        assert_eq!(range.end(), ClockTime::new(0, 45, 0));
        assert_eq!(range.state(Endpoint::End), EndpointState::Bounded);
    }

    #[test]
    fn test_bound_discovery_keeps_start() {
        let mut range = TimeRange::new();
        range.set_start(ClockTime::new(0, 5, 0));
        range.on_bound_discovered(DurationBound::Known(60));
        assert_eq!(range.start(), ClockTime::new(0, 5, 0));
        assert_eq!(range.end(), ClockTime::new(0, 10, 0));
        assert_eq!(range.state(Endpoint::Start), EndpointState::Bounded);
        assert_eq!(range.options(Endpoint::Start).minutes, 0..=1);
    }

    #[test]
    fn test_bound_discovery_recomputes_options() {
        let mut range = TimeRange::new();
        range.on_bound_discovered(DurationBound::Known(3725));
        let start = range.options(Endpoint::Start);
        assert_eq!(start.hours, 0..=1);
        assert_eq!(start.minutes, 0..=59);

        let mut range = TimeRange::new();
        range.on_bound_discovered(DurationBound::Known(600));
        // end sits at 00:10:00, exactly the bound
        let end = range.options(Endpoint::End);
        assert_eq!(end.hours, 0..=0);
        assert_eq!(end.minutes, 0..=10);
        assert_eq!(end.seconds, 0..=0);
    }

    #[test]
    fn test_hour_and_minute_selection_cascade() {
        let mut range = bounded(3725);
        range.set_end(ClockTime::ZERO);
        range.select_hour(Endpoint::End, 1);
        assert_eq!(range.options(Endpoint::End).minutes, 0..=2);
        assert_eq!(range.options(Endpoint::End).seconds, 0..=59);

        range.select_minute(Endpoint::End, 2);
        assert_eq!(range.options(Endpoint::End).seconds, 0..=5);

        range.select_hour(Endpoint::End, 0);
        assert_eq!(range.options(Endpoint::End).minutes, 0..=59);
        assert_eq!(range.options(Endpoint::End).seconds, 0..=59);
    }

    #[test]
    fn test_hour_selection_clamps_lower_fields() {
        let mut range = bounded(3725);
        range.set_end(ClockTime::new(0, 30, 45));
        range.select_hour(Endpoint::End, 1);
        assert_eq!(range.end(), ClockTime::new(1, 2, 5));

        range.set_end(ClockTime::new(0, 1, 45));
        range.select_hour(Endpoint::End, 1);
        assert_eq!(range.end(), ClockTime::new(1, 1, 45));
    }

    #[test]
    fn test_minute_selection_clamps_seconds() {
        let mut range = bounded(3725);
        range.set_end(ClockTime::new(1, 0, 30));
        range.select_minute(Endpoint::End, 2);
        assert_eq!(range.end(), ClockTime::new(1, 2, 5));
    }

    #[test]
    fn test_start_field_selection_advances_end() {
        let mut range = bounded(3725);
        range.select_minute(Endpoint::Start, 12);
        assert_eq!(range.start(), ClockTime::new(0, 12, 0));
        assert_eq!(range.end(), ClockTime::new(0, 22, 0));
    }

    #[test]
    fn test_field_selection_recovers_out_of_range_value() {
        let mut range = TimeRange::new();
        range.set_end(ClockTime::new(0, 45, 0));
        range.on_bound_discovered(DurationBound::Known(600));
        range.select_second(Endpoint::End, 30);
        assert_eq!(range.end(), ClockTime::new(0, 10, 0));
    }

    #[test]
    fn test_compact_fields() {
        let mut range = bounded(7200);
        range.set_start(ClockTime::new(1, 0, 5));
        assert_eq!(
            range.compact_fields(),
            ("60:05".to_string(), "70:05".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "outside the selectable range")]
    fn test_set_start_past_bound_panics() {
        let mut range = bounded(600);
        range.set_start(ClockTime::from_seconds(605));
    }

    #[test]
    #[should_panic(expected = "outside the selectable range")]
    fn test_set_end_with_hours_while_unbounded_panics() {
        let mut range = TimeRange::new();
        range.set_end(ClockTime::new(1, 0, 0));
    }

    #[test]
    #[should_panic(expected = "outside the selectable range")]
    fn test_unnormalized_minutes_panic() {
        let mut range = TimeRange::new();
        range.set_start(ClockTime::new(0, 60, 0));
    }

    #[test]
    #[should_panic(expected = "is not a start option")]
    fn test_select_hour_outside_options_panics() {
        let mut range = bounded(3725);
        range.select_hour(Endpoint::Start, 2);
    }

    #[test]
    fn test_advanced_end_policy_with_known_bound_ignores_policy() {
        for policy in EndAdvancePolicy::ALL {
            assert_eq!(policy.advanced_end(700, DurationBound::Known(3600)), 1300);
            assert_eq!(policy.advanced_end(3500, DurationBound::Known(3600)), 3600);
        }
    }
}
