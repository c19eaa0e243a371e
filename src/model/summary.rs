use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::session::SessionState;

/// Per-state head count for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "working": 1,
        "on_break": 0,
        "on_lunch": 1,
        "finished": 1,
        "absent": 2
    })
)]
pub struct StateCounts {
    pub working: usize,
    pub on_break: usize,
    pub on_lunch: usize,
    pub finished: usize,
    pub absent: usize,
}

impl StateCounts {
    pub fn get(&self, state: SessionState) -> usize {
        match state {
            SessionState::Working => self.working,
            SessionState::OnBreak => self.on_break,
            SessionState::OnLunch => self.on_lunch,
            SessionState::Finished => self.finished,
            SessionState::Absent => self.absent,
        }
    }

    pub fn bump(&mut self, state: SessionState) {
        let slot = match state {
            SessionState::Working => &mut self.working,
            SessionState::OnBreak => &mut self.on_break,
            SessionState::OnLunch => &mut self.on_lunch,
            SessionState::Finished => &mut self.finished,
            SessionState::Absent => &mut self.absent,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.working + self.on_break + self.on_lunch + self.finished + self.absent
    }
}

/// Counts plus the operational metrics the HR dashboard shows for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySummary {
    #[schema(value_type = String, format = "date", example = "2025-03-10")]
    pub date: NaiveDate,
    pub counts: StateCounts,
    pub roster_size: usize,
    pub late_arrivals: usize,
    /// Percentage of roster members with a punctuality verdict who were late.
    pub late_arrival_rate: Option<f64>,
    /// Percentage of the roster counted as absent.
    pub absenteeism_rate: Option<f64>,
    pub mocked_checkins: usize,
    pub total_worked_seconds: u64,
}
