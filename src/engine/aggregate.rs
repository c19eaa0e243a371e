use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::model::employee::{EmployeeId, RosterEntry};
use crate::model::session::{DerivedSession, SessionState};
use crate::model::summary::{DailySummary, StateCounts};

fn visible_ids(roster: &[RosterEntry]) -> BTreeSet<&EmployeeId> {
    roster.iter().map(|e| &e.employee_id).collect()
}

/// Head count per state over the visible roster.
///
/// Roster members with no session, or whose session derives to `Absent`, are
/// counted as absent. Sessions of employees outside the roster are not
/// counted. Duplicate roster entries count once.
pub fn aggregate_daily(
    roster: &[RosterEntry],
    sessions: &HashMap<EmployeeId, DerivedSession>,
) -> StateCounts {
    let mut counts = StateCounts::default();
    for id in visible_ids(roster) {
        let state = sessions
            .get(id)
            .map(|s| s.state)
            .unwrap_or(SessionState::Absent);
        counts.bump(state);
    }
    counts
}

fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(part as f64 * 100.0 / whole as f64)
}

pub fn summarize_daily(
    date: NaiveDate,
    roster: &[RosterEntry],
    sessions: &HashMap<EmployeeId, DerivedSession>,
) -> DailySummary {
    let ids = visible_ids(roster);
    let counts = aggregate_daily(roster, sessions);
    let present: Vec<&DerivedSession> = ids.iter().filter_map(|id| sessions.get(*id)).collect();

    let judged = present.iter().filter(|s| s.punctuality.is_some()).count();
    let late_arrivals = present
        .iter()
        .filter(|s| s.punctuality.is_some_and(|p| p.is_late()))
        .count();

    DailySummary {
        date,
        counts,
        roster_size: ids.len(),
        late_arrivals,
        late_arrival_rate: percentage(late_arrivals, judged),
        absenteeism_rate: percentage(counts.absent, ids.len()),
        mocked_checkins: present.iter().filter(|s| s.is_mocked()).count(),
        total_worked_seconds: present.iter().map(|s| s.worked_seconds).sum(),
    }
}

/// Fixed display priority: working, on break, on lunch, finished, absent.
/// Ties break on employee id.
pub fn sort_for_display(rows: &mut [(EmployeeId, DerivedSession)]) {
    rows.sort_by(|(a_id, a), (b_id, b)| a.state.cmp(&b.state).then_with(|| a_id.cmp(b_id)));
}
