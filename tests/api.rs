use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Service;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{App, test};
use chrono::FixedOffset;
use futures::channel::mpsc::UnboundedReceiver;
use serde_json::{Value, json};

use hrm_attendance::config::Config;
use hrm_attendance::feed::{FeedUpdate, SessionBoard, consumer};
use hrm_attendance::routes;
use hrm_attendance::settings::SettingsStore;

fn config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        api_prefix: "/api".to_string(),
        log_dir: "logs".to_string(),
        rate_feed_per_min: 600,
        office_offset: FixedOffset::east_opt(0).unwrap(),
        shift_start: None,
        grace_period_minutes: 15,
        office_radius_meters: None,
    }
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn finished_day(employee: &str) -> Value {
    json!({
        "employee_id": employee,
        "date": "2025-03-10",
        "entry": {
            "time": "2025-03-10T07:00:00Z",
            "location": { "provider": "gps", "accuracy": 8.0, "distance_from_office": 20.0 }
        },
        "breaks": [
            { "start": "2025-03-10T09:00:00Z", "end": "2025-03-10T09:10:00Z" }
        ],
        "lunch": { "start": "2025-03-10T12:00:00Z", "duration": 30 },
        "exit": { "time": "2025-03-10T17:00:00Z" },
        "state": "finished"
    })
}

/// Shared state of one test app, kept outside so tests can inspect it.
struct Harness {
    config: Config,
    board: Arc<SessionBoard>,
    settings: Arc<SettingsStore>,
    sender: consumer::FeedSender,
    receiver: UnboundedReceiver<FeedUpdate>,
    limiter: routes::LimiterConfig,
}

impl Harness {
    fn new(rate_feed_per_min: u32) -> Self {
        let (sender, receiver) = consumer::channel();
        Self {
            config: config(),
            board: Arc::new(SessionBoard::new()),
            settings: Arc::new(SettingsStore::default()),
            sender,
            receiver,
            limiter: routes::feed_limiter(rate_feed_per_min).unwrap(),
        }
    }

    /// Moves everything queued so far onto the board, as the consumer would.
    fn drain(&mut self, now: &str) -> usize {
        let now = chrono::DateTime::parse_from_rfc3339(now).unwrap();
        let mut applied = 0;
        while let Ok(Some(update)) = self.receiver.try_next() {
            self.board.apply(update, &self.settings.snapshot(), &now);
            applied += 1;
        }
        applied
    }
}

macro_rules! app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::from($h.board.clone()))
                .app_data(Data::from($h.settings.clone()))
                .app_data(Data::new($h.sender.clone()))
                .app_data(Data::new($h.config.clone()))
                .configure(|cfg| routes::configure(cfg, &$h.config, &$h.limiter)),
        )
        .await
    };
}

#[actix_web::test]
async fn derive_returns_session_and_clock_time() {
    let h = Harness::new(600);
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/derive")
        .set_json(json!({ "record": finished_day("EMP-1"), "now": "2025-03-10T18:00:00Z" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["employee_id"], "EMP-1");
    assert_eq!(body["worked_hms"], "09:20:00");
    assert_eq!(body["session"]["state"], "finished");
    assert_eq!(body["session"]["worked_seconds"], 9 * 3600 + 20 * 60);
    assert_eq!(body["session"]["in_progress"], false);
    assert_eq!(body["session"]["punctuality"], Value::Null);
    assert_eq!(body["session"]["location_trust"]["alert"], "normal");
}

#[actix_web::test]
async fn derive_rejects_unparseable_timestamps() {
    let h = Harness::new(600);
    let app = app!(h);

    let mut record = finished_day("EMP-1");
    record["entry"]["time"] = json!("yesterday morning");
    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/derive")
        .set_json(json!({ "record": record }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("entry"));
}

#[actix_web::test]
async fn schedule_update_applies_to_next_derivation() {
    let h = Harness::new(600);
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri("/api/v1/attendance/schedule")
        .set_json(json!({ "schedule": { "shift_start": "06:30:00", "grace_period_minutes": 10 } }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/derive")
        .set_json(json!({ "record": finished_day("EMP-1"), "now": "2025-03-10T18:00:00Z" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["session"]["punctuality"]["classification"], "late");
    assert_eq!(body["session"]["punctuality"]["late_minutes"], 20);
}

#[actix_web::test]
async fn feed_updates_reach_sessions_and_summary() {
    let mut h = Harness::new(600);
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri("/api/v1/attendance/roster")
        .set_json(json!([
            { "employee_id": "EMP-1", "name": "Ana" },
            { "employee_id": "EMP-2" },
            { "employee_id": "EMP-3" }
        ]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for (revision, record) in [(1, finished_day("EMP-1")), (1, finished_day("EMP-2"))] {
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/feed")
            .peer_addr(peer())
            .set_json(json!({ "revision": revision, "record": record }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::ACCEPTED);
    }
    assert_eq!(h.drain("2025-03-10T18:00:00Z"), 2);

    let req = test::TestRequest::get()
        .uri("/api/v1/attendance/sessions?date=2025-03-10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["employee_id"], "EMP-1");
    assert_eq!(rows[1]["employee_id"], "EMP-2");
    assert_eq!(rows[1]["worked_hms"], "09:20:00");

    let req = test::TestRequest::get()
        .uri("/api/v1/attendance/summary?date=2025-03-10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["roster_size"], 3);
    assert_eq!(body["counts"]["finished"], 2);
    assert_eq!(body["counts"]["absent"], 1);
    assert_eq!(body["total_worked_seconds"], 2 * (9 * 3600 + 20 * 60));
}

#[actix_web::test]
async fn feed_rejects_blank_employee() {
    let h = Harness::new(600);
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/feed")
        .peer_addr(peer())
        .set_json(json!({ "revision": 1, "record": finished_day("  ") }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn feed_is_rate_limited_per_peer() {
    let h = Harness::new(1);
    let app = app!(h);

    let mut statuses = Vec::new();
    for revision in 1..=2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/feed")
            .peer_addr(peer())
            .set_json(json!({ "revision": revision, "record": finished_day("EMP-1") }))
            .to_request();
        let status = match app.call(req).await {
            Ok(resp) => resp.status(),
            Err(e) => e.as_response_error().status_code(),
        };
        statuses.push(status);
    }
    assert_eq!(statuses, vec![StatusCode::ACCEPTED, StatusCode::TOO_MANY_REQUESTS]);
}

#[actix_web::test]
async fn geofence_radius_must_be_usable() {
    let h = Harness::new(600);
    let app = app!(h);

    let req = test::TestRequest::put()
        .uri("/api/v1/attendance/geofence")
        .set_json(json!({ "geofence": { "radius_meters": -5.0 } }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.settings.snapshot().geofence, None);

    let req = test::TestRequest::put()
        .uri("/api/v1/attendance/geofence")
        .set_json(json!({ "geofence": { "radius_meters": 150.0 } }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(h.settings.snapshot().geofence_radius(), Some(150.0));
}
