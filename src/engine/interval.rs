//! Interval arithmetic over [`Instant`]s.
//!
//! Every other engine module goes through these helpers instead of
//! subtracting instants directly. Nothing here fails: absent inputs are
//! zero-length and reversed intervals contribute zero.

use chrono::{FixedOffset, Timelike};

use crate::model::attendance::{BreakInterval, Instant};

/// Seconds from `start` to `end`, clamped to `>= 0`.
pub fn duration(start: &Instant, end: &Instant) -> i64 {
    end.signed_duration_since(*start).num_seconds().max(0)
}

/// Like [`duration`], but any absent endpoint yields zero.
pub fn span(start: Option<&Instant>, end: Option<&Instant>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => duration(start, end),
        _ => 0,
    }
}

pub fn is_open(interval: &BreakInterval) -> bool {
    interval.end.is_none()
}

pub fn is_ordered(start: &Instant, end: &Instant) -> bool {
    start <= end
}

/// A closed interval whose end precedes its start.
pub fn is_inverted(interval: &BreakInterval) -> bool {
    interval
        .end
        .as_ref()
        .is_some_and(|end| !is_ordered(&interval.start, end))
}

/// Duration of a closed interval; open intervals contribute nothing yet.
pub fn closed_duration(interval: &BreakInterval) -> i64 {
    span(Some(&interval.start), interval.end.as_ref())
}

/// Whether two intervals share any positive-length stretch of time. Open
/// intervals extend up to `now`.
pub fn overlaps(a: &BreakInterval, b: &BreakInterval, now: &Instant) -> bool {
    let a_end = a.end.unwrap_or(*now);
    let b_end = b.end.unwrap_or(*now);
    a.start < b_end && b.start < a_end
}

/// `total - amount`, never below zero.
pub fn subtract_clamped(total: i64, amount: i64) -> i64 {
    (total - amount.max(0)).max(0)
}

/// The same instant shown on the office wall clock.
pub fn on_office_clock(instant: &Instant, office: &FixedOffset) -> Instant {
    instant.with_timezone(office)
}

/// Whole minutes since local midnight, read in the instant's own offset.
/// Move the instant onto the office clock first with [`on_office_clock`].
pub fn minutes_since_midnight(instant: &Instant) -> i64 {
    let local = instant.time();
    i64::from(local.hour()) * 60 + i64::from(local.minute())
}

/// The open interval with the latest start, if any.
pub fn latest_open<'a, I>(intervals: I) -> Option<&'a BreakInterval>
where
    I: IntoIterator<Item = &'a BreakInterval>,
{
    intervals
        .into_iter()
        .filter(|i| is_open(i))
        .max_by_key(|i| i.start)
}
