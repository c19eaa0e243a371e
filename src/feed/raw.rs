use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A timestamp as the mobile client sends it: RFC 3339 text or epoch
/// milliseconds from older builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstant {
    EpochMillis(i64),
    Text(String),
}

/// Legacy pause duration: whole or fractional minutes, or `HH:MM:SS` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Minutes(f64),
    Clock(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawLocation {
    #[schema(example = "gps")]
    pub provider: Option<String>,

    #[serde(alias = "accuracy_meters")]
    #[schema(example = 12.5)]
    pub accuracy: Option<f64>,

    #[serde(default, alias = "is_mocked")]
    pub mocked: bool,

    #[serde(alias = "distance_from_office_meters")]
    #[schema(example = 35.0)]
    pub distance_from_office: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawCheckpoint {
    #[schema(value_type = Option<String>, example = "2025-03-10T08:02:11-05:00")]
    pub time: Option<RawInstant>,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawPause {
    #[schema(value_type = Option<String>, example = "2025-03-10T10:00:00-05:00")]
    pub start: Option<RawInstant>,

    #[schema(value_type = Option<String>, nullable = true)]
    pub end: Option<RawInstant>,

    #[schema(value_type = Option<String>, example = "00:10:00")]
    pub duration: Option<RawDuration>,
}

/// Loose shape of one attendance document as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "EMP-001",
        "date": "2025-03-10",
        "entry": {
            "time": "2025-03-10T08:02:11-05:00",
            "location": { "provider": "gps", "accuracy": 12.5, "mocked": false, "distance_from_office": 35.0 }
        },
        "breaks": [
            { "start": "2025-03-10T10:00:00-05:00", "end": "2025-03-10T10:10:00-05:00" }
        ],
        "lunch": { "start": "2025-03-10T12:30:00-05:00", "duration": 30 },
        "exit": null,
        "state": "working"
    })
)]
pub struct RawAttendanceRecord {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(value_type = String, format = "date", example = "2025-03-10")]
    pub date: NaiveDate,

    pub entry: Option<RawCheckpoint>,

    #[serde(default)]
    pub breaks: Vec<RawPause>,

    pub lunch: Option<RawPause>,

    pub exit: Option<RawCheckpoint>,

    #[schema(example = "working")]
    pub state: Option<String>,
}
