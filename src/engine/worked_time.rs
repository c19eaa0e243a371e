use crate::engine::interval;
use crate::model::attendance::{AttendanceRecord, Instant};
use crate::model::session::{SessionState, WorkedTime};

/// The exit time, if it can be trusted for calculation. An exit without an
/// entry, or one that precedes the entry, is treated as absent.
pub fn valid_exit_time(record: &AttendanceRecord) -> Option<Instant> {
    let entry = record.entry_time()?;
    record
        .exit_time()
        .filter(|exit| interval::is_ordered(&entry, exit))
}

/// Net worked time of a record at `now`.
///
/// Gross time runs from entry to the exit (or `now` while there is no valid
/// exit). Closed breaks and a closed lunch are deducted; open ones are not
/// deducted yet and only mark the figure as in progress. The running total
/// is clamped at zero after each deduction.
pub fn compute_worked_time(
    record: &AttendanceRecord,
    state: SessionState,
    now: &Instant,
) -> WorkedTime {
    let Some(entry) = record.entry_time() else {
        return WorkedTime::default();
    };
    if state == SessionState::Absent {
        return WorkedTime::default();
    }

    let exit = valid_exit_time(record);
    let end = exit.unwrap_or(*now);
    let mut worked = interval::duration(&entry, &end);
    let mut in_progress = exit.is_none();

    for pause in record.breaks.iter().chain(record.lunch.iter()) {
        if interval::is_open(pause) {
            in_progress = true;
            continue;
        }
        worked = interval::subtract_clamped(worked, interval::closed_duration(pause));
    }

    WorkedTime {
        worked_seconds: u64::try_from(worked).unwrap_or(0),
        in_progress,
    }
}
