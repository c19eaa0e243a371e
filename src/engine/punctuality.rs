use chrono::Timelike;

use crate::engine::interval;
use crate::model::attendance::Instant;
use crate::model::schedule::WorkScheduleConfig;
use crate::model::session::{Punctuality, PunctualityVerdict};

/// Minutes since midnight after which an entry counts as late.
pub fn late_after_minute(schedule: &WorkScheduleConfig) -> i64 {
    let start = &schedule.shift_start;
    i64::from(start.hour()) * 60 + i64::from(start.minute()) + i64::from(schedule.grace_period_minutes)
}

/// Punctuality of an entry against the shift schedule.
///
/// Returns `None` when no schedule is configured; that is "not applicable",
/// never an implicit `OnTime`. The grace boundary is inclusive and seconds
/// are ignored, so an entry at exactly `start + grace` is on time. The entry
/// is read on its own offset; `derive_session` moves it onto the office
/// clock first.
pub fn evaluate_punctuality(
    entry_time: &Instant,
    schedule: Option<&WorkScheduleConfig>,
) -> Option<PunctualityVerdict> {
    let schedule = schedule?;
    let diff = interval::minutes_since_midnight(entry_time) - late_after_minute(schedule);

    let verdict = if diff <= 0 {
        PunctualityVerdict {
            classification: Punctuality::OnTime,
            late_minutes: 0,
        }
    } else {
        PunctualityVerdict {
            classification: Punctuality::Late,
            late_minutes: u32::try_from(diff).unwrap_or(u32::MAX),
        }
    };
    Some(verdict)
}
