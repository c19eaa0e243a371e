use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};

use hrm_attendance::engine::{
    aggregate_daily, compute_worked_time, derive_session, derive_state, evaluate_punctuality,
};
use hrm_attendance::feed::normalize;
use hrm_attendance::feed::raw::RawAttendanceRecord;
use hrm_attendance::model::attendance::{
    AttendanceRecord, BreakInterval, Checkpoint, Instant, SessionKey,
};
use hrm_attendance::model::employee::{EmployeeId, RosterEntry};
use hrm_attendance::model::schedule::{EngineSettings, WorkScheduleConfig};
use hrm_attendance::model::session::{Punctuality, SessionState};
use hrm_attendance::model::summary::StateCounts;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn at(h: u32, m: u32, s: u32) -> Instant {
    FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 10, h, m, s)
        .unwrap()
}

fn eight_with_grace() -> WorkScheduleConfig {
    WorkScheduleConfig {
        shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        grace_period_minutes: 15,
    }
}

fn record(employee: &str) -> AttendanceRecord {
    AttendanceRecord::new(SessionKey::new(employee, day()))
}

#[test]
fn entry_inside_grace_is_on_time() {
    let schedule = eight_with_grace();

    let verdict = evaluate_punctuality(&at(8, 0, 15), Some(&schedule)).unwrap();
    assert_eq!(verdict.classification, Punctuality::OnTime);
    assert_eq!(verdict.late_minutes, 0);

    // exactly start + grace is still on time
    let verdict = evaluate_punctuality(&at(8, 15, 0), Some(&schedule)).unwrap();
    assert_eq!(verdict.classification, Punctuality::OnTime);
}

#[test]
fn entry_one_minute_past_grace_is_late() {
    let verdict = evaluate_punctuality(&at(8, 16, 0), Some(&eight_with_grace())).unwrap();
    assert_eq!(verdict.classification, Punctuality::Late);
    assert_eq!(verdict.late_minutes, 1);
}

#[test]
fn finished_day_deducts_break_and_lunch() {
    let mut r = record("EMP-C");
    r.entry = Some(Checkpoint::at(at(7, 0, 0)));
    r.breaks.push(BreakInterval::closed(at(9, 0, 0), at(9, 10, 0)));
    r.lunch = Some(BreakInterval::closed(at(12, 0, 0), at(12, 30, 0)));
    r.exit = Some(Checkpoint::at(at(17, 0, 0)));

    let state = derive_state(&r);
    assert_eq!(state, SessionState::Finished);

    let worked = compute_worked_time(&r, state, &at(23, 0, 0));
    assert_eq!(worked.worked_seconds, 9 * 3600 + 20 * 60);
    assert!(!worked.in_progress);
}

#[test]
fn open_break_keeps_accruing_until_closed() {
    let mut r = record("EMP-D");
    r.entry = Some(Checkpoint::at(at(7, 0, 0)));
    r.breaks.push(BreakInterval::open(at(9, 0, 0)));

    let session = derive_session(&r, &EngineSettings::default(), &at(9, 5, 0));
    assert_eq!(session.state, SessionState::OnBreak);
    assert_eq!(session.worked_seconds, 2 * 3600 + 5 * 60);
    assert!(session.in_progress);
    assert_eq!(session.current_pause_started_at, Some(at(9, 0, 0)));
}

#[test]
fn roster_without_records_counts_as_absent() {
    let roster: Vec<RosterEntry> = ["E1", "E2", "E3", "E4", "E5"]
        .into_iter()
        .map(RosterEntry::new)
        .collect();
    let settings = EngineSettings::default();
    let now = at(13, 0, 0);

    let mut working = record("E1");
    working.entry = Some(Checkpoint::at(at(8, 0, 0)));

    let mut lunching = record("E2");
    lunching.entry = Some(Checkpoint::at(at(8, 0, 0)));
    lunching.lunch = Some(BreakInterval::open(at(12, 30, 0)));

    let mut finished = record("E3");
    finished.entry = Some(Checkpoint::at(at(6, 0, 0)));
    finished.exit = Some(Checkpoint::at(at(12, 0, 0)));

    let sessions: HashMap<EmployeeId, _> = [working, lunching, finished]
        .iter()
        .map(|r| (r.employee_id().clone(), derive_session(r, &settings, &now)))
        .collect();

    assert_eq!(
        aggregate_daily(&roster, &sessions),
        StateCounts {
            working: 1,
            on_break: 0,
            on_lunch: 1,
            finished: 1,
            absent: 2,
        }
    );
}

#[test]
fn epoch_entry_is_judged_on_the_office_clock() {
    // 1741611600000 ms is 13:00Z, 08:00 in a UTC-05:00 office
    let raw: RawAttendanceRecord = serde_json::from_value(serde_json::json!({
        "employee_id": "EMP-F",
        "date": "2025-03-10",
        "entry": { "time": 1741611600000i64 }
    }))
    .unwrap();
    let record = normalize(&raw).unwrap();
    let settings = EngineSettings {
        schedule: Some(eight_with_grace()),
        office_offset: FixedOffset::west_opt(5 * 3600).unwrap(),
        ..EngineSettings::default()
    };

    let session = derive_session(&record, &settings, &at(9, 0, 0));
    let verdict = session.punctuality.unwrap();
    assert_eq!(verdict.classification, Punctuality::OnTime);
    assert_eq!(verdict.late_minutes, 0);

    // 17 minutes later is two minutes past the grace period
    let mut later = record.clone();
    later.entry = Some(Checkpoint::at(
        record.entry_time().unwrap() + chrono::Duration::minutes(17),
    ));
    let verdict = derive_session(&later, &settings, &at(9, 0, 0)).punctuality.unwrap();
    assert_eq!(verdict.classification, Punctuality::Late);
    assert_eq!(verdict.late_minutes, 2);
}
