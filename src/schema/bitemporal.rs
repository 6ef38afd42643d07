//! Bitemporal intervals
//!
//! A bitemporal record carries two independent time axes: transaction time
//! (when the fact was recorded) and valid time (when it was true). Each axis
//! is a closed `[from, to]` range; an open end is stored as the minimum or
//! maximum representable instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for an open lower bound
pub const MIN_INSTANT: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

/// Sentinel for an open upper bound
pub const MAX_INSTANT: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

/// Closed range of instants on one time axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, treating missing ends as unbounded
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self {
            from: from.unwrap_or(MIN_INSTANT),
            to: to.unwrap_or(MAX_INSTANT),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Whether the two ranges share at least one instant
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.from <= other.to && other.from <= self.to
    }

    /// Whether `other` lies entirely inside this range
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.from <= other.from && other.to <= self.to
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |t: &DateTime<Utc>| {
            if *t == MIN_INSTANT || *t == MAX_INSTANT {
                "*".to_string()
            } else {
                t.timestamp_millis().to_string()
            }
        };
        write!(f, "[{} TO {}]", bound(&self.from), bound(&self.to))
    }
}

/// Transaction-time and valid-time ranges of one record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiTemporalInterval {
    pub transaction_time: TimeRange,
    pub valid_time: TimeRange,
}

impl BiTemporalInterval {
    pub fn new(transaction_time: TimeRange, valid_time: TimeRange) -> Self {
        Self {
            transaction_time,
            valid_time,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(TimeRange::unbounded(), TimeRange::unbounded())
    }

    /// Both axes overlap
    pub fn intersects(&self, other: &BiTemporalInterval) -> bool {
        self.transaction_time.overlaps(&other.transaction_time)
            && self.valid_time.overlaps(&other.valid_time)
    }

    /// `other` lies inside this interval on both axes
    pub fn contains(&self, other: &BiTemporalInterval) -> bool {
        self.transaction_time.contains(&other.transaction_time)
            && self.valid_time.contains(&other.valid_time)
    }
}

impl fmt::Display for BiTemporalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tt={},vt={}", self.transaction_time, self.valid_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(millis)
    }

    #[test]
    fn test_unbounded_contains_everything() {
        let all = TimeRange::unbounded();
        assert!(all.contains(&TimeRange::new(at(1), at(2))));
        assert!(all.contains(&TimeRange::new(None, at(2))));
        assert!(all.contains(&TimeRange::unbounded()));
    }

    #[test]
    fn test_half_open_overlap() {
        let since_ten = TimeRange::new(at(10), None);
        assert!(since_ten.overlaps(&TimeRange::new(at(5), at(10))));
        assert!(!since_ten.overlaps(&TimeRange::new(at(5), at(9))));
        assert!(since_ten.contains(&TimeRange::new(at(10), at(1_000))));
        assert!(!since_ten.contains(&TimeRange::new(None, at(1_000))));
    }

    #[test]
    fn test_interval_relations() {
        let outer = BiTemporalInterval::new(
            TimeRange::new(at(0), at(100)),
            TimeRange::new(at(0), at(100)),
        );
        let inner = BiTemporalInterval::new(
            TimeRange::new(at(10), at(20)),
            TimeRange::new(at(30), at(40)),
        );
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_display() {
        let range = TimeRange::new(at(5), None);
        assert_eq!(range.to_string(), "[5 TO *]");
        assert!(TimeRange::new(at(5), at(1)).is_empty());
    }
}
