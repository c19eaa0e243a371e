use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::model::employee::EmployeeId;
use crate::model::location::LocationSample;

/// An absolute point in time that keeps the wall-clock offset it was
/// recorded with, so time-of-day reads in office-local time.
pub type Instant = DateTime<FixedOffset>;

/// `(employee, calendar date)`: one attendance record per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionKey {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
}

impl SessionKey {
    pub fn new(employee_id: impl Into<EmployeeId>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
        }
    }
}

/// A single timestamped clock event (entry or exit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub time: Instant,
    pub location: Option<LocationSample>,
}

impl Checkpoint {
    pub fn at(time: Instant) -> Self {
        Self {
            time,
            location: None,
        }
    }

    pub fn with_location(mut self, location: LocationSample) -> Self {
        self.location = Some(location);
        self
    }
}

/// A break or lunch interval. `end == None` means it is still open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub start: Instant,
    pub end: Option<Instant>,
}

impl BreakInterval {
    pub fn closed(start: Instant, end: Instant) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn open(start: Instant) -> Self {
        Self { start, end: None }
    }
}

/// Last state the mobile client reported. Only a hint: the engine derives
/// its own canonical state from the timestamps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ReportedState {
    Working,
    #[strum(to_string = "on_break", serialize = "break")]
    OnBreak,
    #[strum(to_string = "on_lunch", serialize = "lunch")]
    OnLunch,
    Finished,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReportedState {
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(ReportedState::Unknown)
    }
}

/// Snapshot of one employee's attendance for one calendar date.
///
/// Every arrival from the feed replaces the previous snapshot for the same
/// key as a whole; nothing here is applied as a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub key: SessionKey,
    pub entry: Option<Checkpoint>,
    #[serde(default)]
    pub breaks: Vec<BreakInterval>,
    pub lunch: Option<BreakInterval>,
    pub exit: Option<Checkpoint>,
    #[serde(default)]
    pub reported_state: ReportedState,
}

impl AttendanceRecord {
    /// An empty record: no checkpoints at all, which derives to `absent`.
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            entry: None,
            breaks: Vec::new(),
            lunch: None,
            exit: None,
            reported_state: ReportedState::Unknown,
        }
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.key.employee_id
    }

    pub fn entry_time(&self) -> Option<Instant> {
        self.entry.as_ref().map(|c| c.time)
    }

    pub fn exit_time(&self) -> Option<Instant> {
        self.exit.as_ref().map(|c| c.time)
    }
}
