//! Attendance session computation.
//!
//! Every function in here is pure: the same snapshot, settings and `now`
//! always produce the same output, and nothing fails or panics.

pub mod aggregate;
pub mod anomaly;
pub mod interval;
pub mod location;
pub mod punctuality;
pub mod state;
pub mod worked_time;

pub use aggregate::{aggregate_daily, sort_for_display, summarize_daily};
pub use location::classify_location;
pub use punctuality::evaluate_punctuality;
pub use state::derive_state;
pub use worked_time::compute_worked_time;

use crate::model::attendance::{AttendanceRecord, Instant};
use crate::model::schedule::EngineSettings;
use crate::model::session::{DerivedSession, SessionState};

/// Runs every per-record computation over one snapshot.
pub fn derive_session(
    record: &AttendanceRecord,
    settings: &EngineSettings,
    now: &Instant,
) -> DerivedSession {
    let state = derive_state(record);
    let worked = compute_worked_time(record, state, now);
    let radius = settings.geofence_radius();

    let punctuality = record.entry_time().and_then(|entry| {
        let entry = interval::on_office_clock(&entry, &settings.office_offset);
        evaluate_punctuality(&entry, settings.schedule.as_ref())
    });

    let entry_location = record.entry.as_ref().and_then(|c| c.location.as_ref());
    let exit_location_trust = record
        .exit
        .as_ref()
        .map(|c| classify_location(c.location.as_ref(), radius));

    let current_pause_started_at = match state {
        SessionState::OnLunch => record.lunch.map(|l| l.start),
        SessionState::OnBreak => interval::latest_open(&record.breaks).map(|b| b.start),
        _ => None,
    };

    DerivedSession {
        state,
        worked_seconds: worked.worked_seconds,
        in_progress: worked.in_progress,
        punctuality,
        location_trust: classify_location(entry_location, radius),
        exit_location_trust,
        current_pause_started_at,
        anomalies: anomaly::detect_anomalies(record, now),
    }
}
