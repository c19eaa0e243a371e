use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use utoipa::ToSchema;

use crate::model::attendance::Instant;

/// Canonical session state.
///
/// Declaration order is the display priority: the most time-critical states
/// sort first and `Absent` sorts last.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Working,
    OnBreak,
    OnLunch,
    Finished,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Punctuality {
    OnTime,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PunctualityVerdict {
    pub classification: Punctuality,
    /// Zero unless `classification` is `Late`.
    pub late_minutes: u32,
}

impl PunctualityVerdict {
    pub fn is_late(&self) -> bool {
        self.classification == Punctuality::Late
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderTier {
    Trusted,
    Degraded,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccuracyTier {
    High,
    Medium,
    Low,
    Unknown,
}

/// Human-facing severity of a location verdict, lowest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertLevel {
    Normal,
    Caution,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrustVerdict {
    pub provider_tier: ProviderTier,
    pub accuracy_tier: AccuracyTier,
    pub mocked: bool,
    /// `None` means no opinion: either the distance or the radius is unknown.
    pub within_geofence: Option<bool>,
    pub alert: AlertLevel,
}

/// Data problems detected while deriving a session. They are reported, never
/// raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Anomaly {
    ExitBeforeEntry,
    ExitWithoutEntry,
    InvertedBreak,
    InvertedLunch,
    MultipleOpenBreaks,
    PauseOverlap,
    EventsAfterExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct WorkedTime {
    pub worked_seconds: u64,
    /// The figure is not final: the session has no valid exit yet, or a
    /// break or lunch is still open.
    pub in_progress: bool,
}

/// Everything the engine derives for one record. Recomputed on demand and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DerivedSession {
    pub state: SessionState,
    pub worked_seconds: u64,
    pub in_progress: bool,
    /// `None` when no schedule is configured or the record has no entry.
    pub punctuality: Option<PunctualityVerdict>,
    pub location_trust: TrustVerdict,
    pub exit_location_trust: Option<TrustVerdict>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub current_pause_started_at: Option<Instant>,
    pub anomalies: Vec<Anomaly>,
}

impl DerivedSession {
    pub fn is_mocked(&self) -> bool {
        self.location_trust.mocked || self.exit_location_trust.is_some_and(|t| t.mocked)
    }
}
