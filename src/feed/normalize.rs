use chrono::{DateTime, Duration, Utc};
use derive_more::Display;
use tracing::warn;

use crate::feed::raw::{
    RawAttendanceRecord, RawCheckpoint, RawDuration, RawInstant, RawLocation, RawPause,
};
use crate::model::attendance::{
    AttendanceRecord, BreakInterval, Checkpoint, Instant, ReportedState, SessionKey,
};
use crate::model::location::{LocationProvider, LocationSample};
use crate::utils::hms;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum FeedError {
    #[display(fmt = "employee_id must not be empty")]
    MissingEmployee,
    #[display(fmt = "{} has an invalid timestamp `{}`", field, value)]
    InvalidTimestamp { field: &'static str, value: String },
    #[display(fmt = "{} has an invalid duration `{}`", field, value)]
    InvalidDuration { field: &'static str, value: String },
}

impl std::error::Error for FeedError {}

fn instant(raw: &RawInstant, field: &'static str) -> Result<Instant, FeedError> {
    match raw {
        RawInstant::EpochMillis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)
            .map(|utc| utc.fixed_offset())
            .ok_or_else(|| FeedError::InvalidTimestamp {
                field,
                value: ms.to_string(),
            }),
        RawInstant::Text(text) => {
            DateTime::parse_from_rfc3339(text.trim()).map_err(|_| FeedError::InvalidTimestamp {
                field,
                value: text.clone(),
            })
        }
    }
}

/// Seconds encoded by a legacy duration. Zero and negative values mean "no
/// duration recorded".
fn duration_seconds(raw: &RawDuration, field: &'static str) -> Result<Option<i64>, FeedError> {
    let seconds = match raw {
        RawDuration::Minutes(minutes) if minutes.is_finite() => (minutes * 60.0).round() as i64,
        RawDuration::Minutes(minutes) => {
            return Err(FeedError::InvalidDuration {
                field,
                value: minutes.to_string(),
            });
        }
        RawDuration::Clock(text) => {
            let parsed = hms::parse_hms(text).ok_or_else(|| FeedError::InvalidDuration {
                field,
                value: text.clone(),
            })?;
            i64::try_from(parsed).unwrap_or(i64::MAX)
        }
    };
    Ok((seconds > 0).then_some(seconds))
}

fn location(raw: &RawLocation) -> LocationSample {
    LocationSample {
        provider: raw
            .provider
            .as_deref()
            .map(LocationProvider::parse_lenient)
            .unwrap_or(LocationProvider::Unknown),
        accuracy_meters: raw.accuracy,
        is_mocked: raw.mocked,
        distance_from_office_meters: raw.distance_from_office,
    }
}

fn checkpoint(raw: &RawCheckpoint, field: &'static str) -> Result<Option<Checkpoint>, FeedError> {
    let Some(time) = raw.time.as_ref() else {
        return Ok(None);
    };
    Ok(Some(Checkpoint {
        time: instant(time, field)?,
        location: raw.location.as_ref().map(location),
    }))
}

/// A positive legacy duration wins and closes the pause at
/// `start + duration`; otherwise the explicit end is used; otherwise the pause
/// is still open.
fn pause(raw: &RawPause, field: &'static str) -> Result<Option<BreakInterval>, FeedError> {
    let Some(start) = raw.start.as_ref() else {
        return Ok(None);
    };
    let start = instant(start, field)?;
    let recorded = match raw.duration.as_ref() {
        Some(duration) => duration_seconds(duration, field)?,
        None => None,
    };
    let end = match (recorded, raw.end.as_ref()) {
        (Some(secs), _) => Some(
            Duration::try_seconds(secs)
                .and_then(|d| start.checked_add_signed(d))
                .ok_or_else(|| FeedError::InvalidDuration {
                    field,
                    value: secs.to_string(),
                })?,
        ),
        (None, Some(end)) => Some(instant(end, field)?),
        (None, None) => None,
    };
    Ok(Some(BreakInterval { start, end }))
}

/// Converts a loose feed document into a strict [`AttendanceRecord`].
pub fn normalize(raw: &RawAttendanceRecord) -> Result<AttendanceRecord, FeedError> {
    let employee_id = raw.employee_id.trim();
    if employee_id.is_empty() {
        return Err(FeedError::MissingEmployee);
    }

    let mut breaks = Vec::with_capacity(raw.breaks.len());
    for (index, raw_break) in raw.breaks.iter().enumerate() {
        match pause(raw_break, "breaks")? {
            Some(interval) => breaks.push(interval),
            None => warn!(employee_id, date = %raw.date, index, "Dropping break without start"),
        }
    }

    let lunch = match raw.lunch.as_ref() {
        Some(raw_lunch) => {
            let lunch = pause(raw_lunch, "lunch")?;
            if lunch.is_none() {
                warn!(employee_id, date = %raw.date, "Dropping lunch without start");
            }
            lunch
        }
        None => None,
    };

    let entry = match raw.entry.as_ref() {
        Some(c) => checkpoint(c, "entry")?,
        None => None,
    };
    let exit = match raw.exit.as_ref() {
        Some(c) => checkpoint(c, "exit")?,
        None => None,
    };

    Ok(AttendanceRecord {
        key: SessionKey::new(employee_id, raw.date),
        entry,
        breaks,
        lunch,
        exit,
        reported_state: raw
            .state
            .as_deref()
            .map(ReportedState::parse_lenient)
            .unwrap_or_default(),
    })
}
