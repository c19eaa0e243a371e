use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::engine;
use crate::feed::raw::RawAttendanceRecord;
use crate::feed::{FeedSender, FeedUpdate, SessionBoard, normalize};
use crate::model::attendance::Instant;
use crate::model::employee::{EmployeeId, RosterEntry};
use crate::model::schedule::{OfficeGeofence, WorkScheduleConfig};
use crate::model::session::DerivedSession;
use crate::model::summary::DailySummary;
use crate::settings::SettingsStore;
use crate::utils::hms::format_hms;

#[derive(Deserialize, ToSchema)]
pub struct DeriveRequest {
    pub record: RawAttendanceRecord,
    /// Reference instant for open sessions. Defaults to the office clock.
    #[schema(value_type = Option<String>, format = "date-time", example = "2025-03-10T12:00:00-05:00")]
    pub now: Option<Instant>,
}

#[derive(Deserialize, ToSchema)]
pub struct FeedRequest {
    /// Producer-side revision of this snapshot, increasing per employee and day.
    #[schema(example = 7)]
    pub revision: u64,
    pub record: RawAttendanceRecord,
}

#[derive(Serialize, ToSchema)]
pub struct SessionRow {
    #[schema(value_type = String, example = "EMP-001")]
    pub employee_id: EmployeeId,
    #[schema(example = "03:45:10")]
    pub worked_hms: String,
    pub session: DerivedSession,
}

impl SessionRow {
    fn new(employee_id: EmployeeId, session: DerivedSession) -> Self {
        Self {
            employee_id,
            worked_hms: format_hms(session.worked_seconds),
            session,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SessionListResponse {
    #[schema(value_type = String, format = "date", example = "2025-03-10")]
    pub date: NaiveDate,
    pub data: Vec<SessionRow>,
}

#[derive(Deserialize, IntoParams)]
pub struct DateQuery {
    /// Calendar day in office time. Defaults to today.
    #[param(value_type = Option<String>, format = "date", example = "2025-03-10")]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct ScheduleUpdate {
    /// `null` clears the schedule and disables punctuality.
    pub schedule: Option<WorkScheduleConfig>,
}

#[derive(Deserialize, ToSchema)]
pub struct GeofenceUpdate {
    /// `null` clears the geofence.
    pub geofence: Option<OfficeGeofence>,
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "message": message.into()
    }))
}

/// Derive a session for one raw record without touching the board
#[utoipa::path(
    post,
    path = "/api/v1/attendance/derive",
    request_body = DeriveRequest,
    responses(
        (status = 200, description = "Derived session", body = SessionRow),
        (status = 400, description = "Malformed record", body = Object, example = json!({
            "message": "entry has an invalid timestamp `yesterday`"
        }))
    ),
    tag = "Attendance"
)]
pub async fn derive_session(
    body: web::Json<DeriveRequest>,
    settings: web::Data<SettingsStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let DeriveRequest { record, now } = body.into_inner();
    let record = match normalize(&record) {
        Ok(record) => record,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let now = now.unwrap_or_else(|| config.now());
    let session = engine::derive_session(&record, &settings.snapshot(), &now);

    Ok(HttpResponse::Ok().json(SessionRow::new(record.key.employee_id, session)))
}

/// Enqueue one attendance snapshot from the feed
#[utoipa::path(
    post,
    path = "/api/v1/attendance/feed",
    request_body = FeedRequest,
    responses(
        (status = 202, description = "Snapshot queued", body = Object, example = json!({
            "message": "Snapshot queued"
        })),
        (status = 400, description = "Malformed record", body = Object, example = json!({
            "message": "employee_id must not be empty"
        })),
        (status = 429, description = "Too many requests"),
        (status = 503, description = "Feed consumer is not running")
    ),
    tag = "Attendance"
)]
pub async fn ingest_feed(
    body: web::Json<FeedRequest>,
    sender: web::Data<FeedSender>,
) -> actix_web::Result<impl Responder> {
    let FeedRequest { revision, record } = body.into_inner();
    let record = match normalize(&record) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, revision, "Rejected attendance snapshot");
            return Ok(bad_request(e.to_string()));
        }
    };

    sender
        .unbounded_send(FeedUpdate { revision, record })
        .map_err(|e| {
            tracing::error!(error = %e, "Attendance feed consumer is gone");
            actix_web::error::ErrorServiceUnavailable("Feed consumer is not running")
        })?;

    Ok(HttpResponse::Accepted().json(serde_json::json!({
        "message": "Snapshot queued"
    })))
}

/// Derived sessions of a day, most time-critical first
#[utoipa::path(
    get,
    path = "/api/v1/attendance/sessions",
    params(DateQuery),
    responses(
        (status = 200, description = "Sessions in display order", body = SessionListResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_sessions(
    query: web::Query<DateQuery>,
    board: web::Data<SessionBoard>,
    settings: web::Data<SettingsStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let now = config.now();
    let date = query.date.unwrap_or_else(|| now.date_naive());

    let data = board
        .display_rows(date, &settings.snapshot(), &now)
        .into_iter()
        .map(|(employee_id, session)| SessionRow::new(employee_id, session))
        .collect();

    Ok(HttpResponse::Ok().json(SessionListResponse { date, data }))
}

/// Head counts and dashboard metrics of a day
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary",
    params(DateQuery),
    responses(
        (status = 200, description = "Daily summary", body = DailySummary)
    ),
    tag = "Attendance"
)]
pub async fn daily_summary(
    query: web::Query<DateQuery>,
    board: web::Data<SessionBoard>,
    settings: web::Data<SettingsStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let now = config.now();
    let date = query.date.unwrap_or_else(|| now.date_naive());

    Ok(HttpResponse::Ok().json(board.summary(date, &settings.snapshot(), &now)))
}

/// Replace the visible roster
#[utoipa::path(
    put,
    path = "/api/v1/attendance/roster",
    request_body = Vec<RosterEntry>,
    responses(
        (status = 200, description = "Roster replaced", body = Object, example = json!({
            "message": "Roster replaced",
            "size": 3
        }))
    ),
    tag = "Attendance"
)]
pub async fn replace_roster(
    body: web::Json<Vec<RosterEntry>>,
    board: web::Data<SessionBoard>,
) -> actix_web::Result<impl Responder> {
    let roster = body.into_inner();
    let size = roster.len();
    board.replace_roster(roster);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Roster replaced",
        "size": size
    })))
}

/// Set or clear the shift schedule
#[utoipa::path(
    put,
    path = "/api/v1/attendance/schedule",
    request_body = ScheduleUpdate,
    responses(
        (status = 200, description = "Schedule updated", body = Object, example = json!({
            "message": "Schedule updated"
        }))
    ),
    tag = "Attendance"
)]
pub async fn set_schedule(
    body: web::Json<ScheduleUpdate>,
    settings: web::Data<SettingsStore>,
) -> actix_web::Result<impl Responder> {
    settings.set_schedule(body.into_inner().schedule);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Schedule updated"
    })))
}

/// Set or clear the office geofence
#[utoipa::path(
    put,
    path = "/api/v1/attendance/geofence",
    request_body = GeofenceUpdate,
    responses(
        (status = 200, description = "Geofence updated", body = Object, example = json!({
            "message": "Geofence updated"
        })),
        (status = 400, description = "Invalid radius", body = Object, example = json!({
            "message": "radius_meters must be a finite, non-negative number"
        }))
    ),
    tag = "Attendance"
)]
pub async fn set_geofence(
    body: web::Json<GeofenceUpdate>,
    settings: web::Data<SettingsStore>,
) -> actix_web::Result<impl Responder> {
    let geofence = body.into_inner().geofence;
    if let Some(g) = geofence {
        if !g.radius_meters.is_finite() || g.radius_meters < 0.0 {
            return Ok(bad_request(
                "radius_meters must be a finite, non-negative number",
            ));
        }
    }
    settings.set_geofence(geofence);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Geofence updated"
    })))
}
