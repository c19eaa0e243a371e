use crate::engine::interval;
use crate::engine::worked_time::valid_exit_time;
use crate::model::attendance::{AttendanceRecord, Instant};
use crate::model::session::Anomaly;

/// Data problems in a snapshot. Detection is advisory: the calculators
/// already degrade around every case listed here.
pub fn detect_anomalies(record: &AttendanceRecord, now: &Instant) -> Vec<Anomaly> {
    let mut found = Vec::new();

    match (record.entry_time(), record.exit_time()) {
        (None, Some(_)) => found.push(Anomaly::ExitWithoutEntry),
        (Some(entry), Some(exit)) if !interval::is_ordered(&entry, &exit) => {
            found.push(Anomaly::ExitBeforeEntry)
        }
        _ => {}
    }

    if record.breaks.iter().any(interval::is_inverted) {
        found.push(Anomaly::InvertedBreak);
    }
    if record.lunch.as_ref().is_some_and(interval::is_inverted) {
        found.push(Anomaly::InvertedLunch);
    }
    if record.breaks.iter().filter(|b| interval::is_open(b)).count() > 1 {
        found.push(Anomaly::MultipleOpenBreaks);
    }
    if let Some(lunch) = record.lunch.as_ref() {
        if record
            .breaks
            .iter()
            .any(|b| interval::overlaps(b, lunch, now))
        {
            found.push(Anomaly::PauseOverlap);
        }
    }
    if let Some(exit) = valid_exit_time(record) {
        if record
            .breaks
            .iter()
            .chain(record.lunch.iter())
            .any(|p| !interval::is_ordered(&p.start, &exit))
        {
            found.push(Anomaly::EventsAfterExit);
        }
    }

    found
}
