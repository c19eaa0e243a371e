use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine;
use crate::model::attendance::{AttendanceRecord, Instant, ReportedState, SessionKey};
use crate::model::employee::{EmployeeId, RosterEntry};
use crate::model::schedule::EngineSettings;
use crate::model::session::{DerivedSession, SessionState};
use crate::model::summary::DailySummary;

/// One snapshot delivered by the feed. `revision` increases monotonically per
/// key on the producer side.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedUpdate {
    pub revision: u64,
    pub record: AttendanceRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied {
        previous: Option<SessionState>,
        current: SessionState,
    },
    /// An older revision than the one already held; nothing changed.
    Stale { held: u64, offered: u64 },
}

#[derive(Debug)]
struct BoardEntry {
    revision: u64,
    record: AttendanceRecord,
    state: SessionState,
}

/// Latest snapshot per `(employee, date)` plus the visible roster.
///
/// Only raw snapshots are kept. Derived sessions are recomputed from them on
/// every read so in-progress figures follow `now` and the current settings.
#[derive(Debug, Default)]
pub struct SessionBoard {
    records: RwLock<HashMap<SessionKey, BoardEntry>>,
    roster: RwLock<Vec<RosterEntry>>,
}

fn reported_matches(reported: ReportedState, derived: SessionState) -> bool {
    matches!(
        (reported, derived),
        (ReportedState::Unknown, _)
            | (ReportedState::Working, SessionState::Working)
            | (ReportedState::OnBreak, SessionState::OnBreak)
            | (ReportedState::OnLunch, SessionState::OnLunch)
            | (ReportedState::Finished, SessionState::Finished)
    )
}

impl SessionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot for the update's key and re-derives that key
    /// only. Older revisions are dropped; an equal revision is a redelivery
    /// and replaces the held snapshot.
    pub fn apply(
        &self,
        update: FeedUpdate,
        settings: &EngineSettings,
        now: &Instant,
    ) -> ApplyOutcome {
        let FeedUpdate { revision, record } = update;
        let key = record.key.clone();
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(held) = records.get(&key) {
            if revision < held.revision {
                warn!(
                    employee_id = %key.employee_id,
                    date = %key.date,
                    held = held.revision,
                    offered = revision,
                    "Dropping stale attendance snapshot"
                );
                return ApplyOutcome::Stale {
                    held: held.revision,
                    offered: revision,
                };
            }
        }

        let session = engine::derive_session(&record, settings, now);
        let previous = records.get(&key).map(|held| held.state);

        if previous != Some(session.state) {
            info!(
                employee_id = %key.employee_id,
                date = %key.date,
                from = ?previous,
                to = %session.state,
                "Session state changed"
            );
        }
        if !reported_matches(record.reported_state, session.state) {
            debug!(
                employee_id = %key.employee_id,
                reported = %record.reported_state,
                derived = %session.state,
                "Reported state differs from derived state"
            );
        }
        if !session.anomalies.is_empty() {
            warn!(
                employee_id = %key.employee_id,
                date = %key.date,
                anomalies = ?session.anomalies,
                "Attendance data anomaly"
            );
        }
        if session.is_mocked() {
            warn!(
                employee_id = %key.employee_id,
                date = %key.date,
                "Mocked location reported for checkpoint"
            );
        }

        records.insert(
            key,
            BoardEntry {
                revision,
                record,
                state: session.state,
            },
        );
        ApplyOutcome::Applied {
            previous,
            current: session.state,
        }
    }

    pub fn replace_roster(&self, roster: Vec<RosterEntry>) {
        let mut guard = self.roster.write().unwrap_or_else(PoisonError::into_inner);
        info!(size = roster.len(), "Roster replaced");
        *guard = roster;
    }

    pub fn roster(&self) -> Vec<RosterEntry> {
        self.roster
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn record(&self, key: &SessionKey) -> Option<AttendanceRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .map(|entry| entry.record.clone())
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Derived sessions of every record held for `date`.
    pub fn sessions_on(
        &self,
        date: NaiveDate,
        settings: &EngineSettings,
        now: &Instant,
    ) -> HashMap<EmployeeId, DerivedSession> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(key, _)| key.date == date)
            .map(|(key, entry)| {
                (
                    key.employee_id.clone(),
                    engine::derive_session(&entry.record, settings, now),
                )
            })
            .collect()
    }

    /// Sessions of `date` in display order.
    pub fn display_rows(
        &self,
        date: NaiveDate,
        settings: &EngineSettings,
        now: &Instant,
    ) -> Vec<(EmployeeId, DerivedSession)> {
        let mut rows: Vec<_> = self.sessions_on(date, settings, now).into_iter().collect();
        engine::sort_for_display(&mut rows);
        rows
    }

    pub fn summary(&self, date: NaiveDate, settings: &EngineSettings, now: &Instant) -> DailySummary {
        let sessions = self.sessions_on(date, settings, now);
        engine::summarize_daily(date, &self.roster(), &sessions)
    }
}
