//! Minute-granularity timestamps and time ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An instant in time, counted in whole minutes from a reference midnight.
///
/// Route timing works at minute granularity: travel durations are converted
/// to whole hours plus rounded minutes before being added to a timestamp.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Timestamp;
///
/// let t = Timestamp::from_hm(9, 30);
/// assert_eq!(t.minutes(), 570);
/// assert_eq!(t.plus_hours(2).plus_minutes(15), Timestamp::from_hm(11, 45));
/// assert_eq!(t.to_string(), "09:30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The far future. Used as the deadline of deadline-free stops.
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    /// Creates a timestamp from a minute count.
    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    /// Creates a timestamp at `hours:minutes` on the reference day.
    pub fn from_hm(hours: i64, minutes: i64) -> Self {
        Self(hours * 60 + minutes)
    }

    /// Minutes since the reference midnight.
    pub fn minutes(&self) -> i64 {
        self.0
    }

    /// Returns this timestamp shifted by the given number of hours.
    pub fn plus_hours(self, hours: i64) -> Self {
        Self(self.0 + hours * 60)
    }

    /// Returns this timestamp shifted by the given number of minutes.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        Self(self.0 + minutes)
    }

    /// Signed minute difference `self - earlier`.
    pub fn minutes_since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.0.div_euclid(24 * 60);
        let rem = self.0.rem_euclid(24 * 60);
        let (h, m) = (rem / 60, rem % 60);
        if day == 0 {
            write!(f, "{h:02}:{m:02}")
        } else {
            write!(f, "{day}d {h:02}:{m:02}")
        }
    }
}

/// A start/end timestamp pair bounding a shift or a break.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{TimeRange, Timestamp};
///
/// let shift = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).unwrap();
/// assert!(shift.contains(Timestamp::from_hm(12, 0)));
/// assert!(shift.is_past(Timestamp::from_hm(17, 1)));
/// assert!((shift.hours_past_end(Timestamp::from_hm(18, 30)) - 1.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Creates a new time range.
    ///
    /// Returns `None` if `start > end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Start of the range.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// End of the range.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Returns `true` if the instant falls within the range (inclusive).
    pub fn contains(&self, t: Timestamp) -> bool {
        t >= self.start && t <= self.end
    }

    /// Returns `true` if the instant is strictly after the range's end.
    pub fn is_past(&self, t: Timestamp) -> bool {
        t > self.end
    }

    /// Fractional hours by which the instant overshoots the range's end.
    ///
    /// Zero if the instant is at or before the end.
    pub fn hours_past_end(&self, t: Timestamp) -> f64 {
        let minutes = t.minutes_since(self.end);
        if minutes > 0 {
            minutes as f64 / 60.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_arithmetic() {
        let t = Timestamp::from_hm(8, 0);
        assert_eq!(t.minutes(), 480);
        assert_eq!(t.plus_hours(1), Timestamp::from_hm(9, 0));
        assert_eq!(t.plus_minutes(90), Timestamp::from_hm(9, 30));
        assert_eq!(t.plus_minutes(-60), Timestamp::from_hm(7, 0));
        assert_eq!(Timestamp::from_hm(10, 0).minutes_since(t), 120);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::from_hm(9, 0) < Timestamp::from_hm(9, 1));
        assert!(Timestamp::from_hm(9, 0) < Timestamp::MAX);
    }

    #[test]
    fn test_timestamp_display() {
        assert_eq!(Timestamp::from_hm(7, 5).to_string(), "07:05");
        assert_eq!(Timestamp::from_hm(25, 30).to_string(), "1d 01:30");
    }

    #[test]
    fn test_time_range_valid() {
        let r = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).expect("valid");
        assert_eq!(r.start(), Timestamp::from_hm(9, 0));
        assert_eq!(r.end(), Timestamp::from_hm(17, 0));
    }

    #[test]
    fn test_time_range_invalid() {
        assert!(TimeRange::new(Timestamp::from_hm(17, 0), Timestamp::from_hm(9, 0)).is_none());
    }

    #[test]
    fn test_time_range_contains() {
        let r = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).expect("valid");
        assert!(r.contains(Timestamp::from_hm(9, 0)));
        assert!(r.contains(Timestamp::from_hm(17, 0)));
        assert!(!r.contains(Timestamp::from_hm(8, 59)));
        assert!(!r.contains(Timestamp::from_hm(17, 1)));
    }

    #[test]
    fn test_time_range_is_past() {
        let r = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).expect("valid");
        assert!(!r.is_past(Timestamp::from_hm(17, 0)));
        assert!(r.is_past(Timestamp::from_hm(17, 1)));
        assert!(!r.is_past(Timestamp::from_hm(8, 0)));
    }

    #[test]
    fn test_hours_past_end() {
        let r = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).expect("valid");
        assert_eq!(r.hours_past_end(Timestamp::from_hm(16, 0)), 0.0);
        assert_eq!(r.hours_past_end(Timestamp::from_hm(17, 0)), 0.0);
        assert!((r.hours_past_end(Timestamp::from_hm(17, 45)) - 0.75).abs() < 1e-10);
        assert!((r.hours_past_end(Timestamp::from_hm(19, 0)) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_serde_round() {
        let r = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).expect("valid");
        let json = serde_json::to_string(&r).expect("serialize");
        let back: TimeRange = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, r);
    }
}
