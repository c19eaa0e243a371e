use crate::api::attendance::{
    DeriveRequest, FeedRequest, GeofenceUpdate, ScheduleUpdate, SessionListResponse, SessionRow,
};
use crate::feed::raw::{RawAttendanceRecord, RawCheckpoint, RawLocation, RawPause};
use crate::model::employee::RosterEntry;
use crate::model::schedule::{OfficeGeofence, WorkScheduleConfig};
use crate::model::session::{
    AccuracyTier, AlertLevel, Anomaly, DerivedSession, ProviderTier, Punctuality,
    PunctualityVerdict, SessionState, TrustVerdict,
};
use crate::model::summary::{DailySummary, StateCounts};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Attendance API",
        version = "1.0.0",
        description = r#"
## Attendance Session Computation

Derives the canonical state of each employee's working day from the raw
check-in feed of the mobile client.

### 🔹 Key Features
- **Session derivation**
  - Working, on break, on lunch, finished or absent, from checkpoints alone
- **Worked time**
  - Exit minus entry minus closed breaks and lunch, live for open sessions
- **Punctuality**
  - On time or late against the configured shift start and grace period
- **Location trust**
  - Provider, accuracy, mock detection and office geofence
- **Daily summary**
  - Head counts per state, late arrivals and absenteeism for the roster

### 📦 Response Format
- JSON-based RESTful responses
- Timestamps are RFC 3339 with offset; worked time is also given as `HH:MM:SS`

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::derive_session,
        crate::api::attendance::ingest_feed,
        crate::api::attendance::list_sessions,
        crate::api::attendance::daily_summary,
        crate::api::attendance::replace_roster,
        crate::api::attendance::set_schedule,
        crate::api::attendance::set_geofence
    ),
    components(
        schemas(
            DeriveRequest,
            FeedRequest,
            SessionRow,
            SessionListResponse,
            ScheduleUpdate,
            GeofenceUpdate,
            RawAttendanceRecord,
            RawCheckpoint,
            RawLocation,
            RawPause,
            RosterEntry,
            WorkScheduleConfig,
            OfficeGeofence,
            DerivedSession,
            SessionState,
            Punctuality,
            PunctualityVerdict,
            ProviderTier,
            AccuracyTier,
            AlertLevel,
            TrustVerdict,
            Anomaly,
            StateCounts,
            DailySummary
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance session APIs"),
    )
)]
pub struct ApiDoc;
