use crate::engine::interval;
use crate::model::attendance::AttendanceRecord;
use crate::model::session::SessionState;

/// Canonical state of a record snapshot.
///
/// Rules are checked in precedence order on every call; there is no stored
/// transition history. Once an exit exists the state stays `Finished`
/// whatever else the snapshot carries.
pub fn derive_state(record: &AttendanceRecord) -> SessionState {
    if record.entry.is_none() {
        return SessionState::Absent;
    }
    if record.exit.is_some() {
        return SessionState::Finished;
    }
    if record.lunch.as_ref().is_some_and(interval::is_open) {
        return SessionState::OnLunch;
    }
    if interval::latest_open(&record.breaks).is_some() {
        return SessionState::OnBreak;
    }
    SessionState::Working
}
