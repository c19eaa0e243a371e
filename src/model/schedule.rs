use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shift schedule used for punctuality. Process-wide and read-only from the
/// engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "shift_start": "08:00:00",
        "grace_period_minutes": 15
    })
)]
pub struct WorkScheduleConfig {
    #[schema(value_type = String, example = "08:00:00")]
    pub shift_start: NaiveTime,

    #[schema(example = 15)]
    pub grace_period_minutes: u32,
}

/// Office geofence. Only the radius lives here; the distance of each fix is
/// supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OfficeGeofence {
    #[schema(example = 150.0)]
    pub radius_meters: f64,
}

/// Configuration the engine reads on every derivation. Schedule and geofence
/// may be missing, which degrades the matching verdict to "not applicable".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub schedule: Option<WorkScheduleConfig>,
    pub geofence: Option<OfficeGeofence>,
    /// Wall clock the shift start is expressed in. Entry times are moved onto
    /// it before punctuality is judged.
    pub office_offset: FixedOffset,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            schedule: None,
            geofence: None,
            office_offset: Utc.fix(),
        }
    }
}

impl EngineSettings {
    pub fn geofence_radius(&self) -> Option<f64> {
        self.geofence.map(|g| g.radius_meters)
    }
}
