use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, NaiveTime, Utc};
use dotenvy::dotenv;

use crate::model::attendance::Instant;
use crate::model::schedule::{EngineSettings, OfficeGeofence, WorkScheduleConfig};

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,
    pub log_dir: String,

    // Rate limiting
    pub rate_feed_per_min: u32,

    /// Office wall-clock offset, used for "today", "now" and punctuality.
    pub office_offset: FixedOffset,

    // Initial engine settings; administrators can replace them at runtime
    pub shift_start: Option<NaiveTime>,
    pub grace_period_minutes: u32,
    pub office_radius_meters: Option<f64>,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .trim()
        .parse()
        .with_context(|| format!("{key} is not a valid value"))
}

fn parse_shift_start(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("SHIFT_START `{raw}` is not HH:MM"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let offset_minutes: i32 = parse_var("OFFICE_UTC_OFFSET_MINUTES", "0")?;
        let office_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| anyhow!("OFFICE_UTC_OFFSET_MINUTES {offset_minutes} is out of range"))?;

        let shift_start = match env::var("SHIFT_START") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_shift_start(raw.trim())?),
            _ => None,
        };

        let office_radius_meters = match env::var("OFFICE_RADIUS_METERS") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<f64>()
                    .context("OFFICE_RADIUS_METERS is not a number")?,
            ),
            _ => None,
        };

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),
            rate_feed_per_min: parse_var("RATE_FEED_PER_MIN", "6000")?, // default 100/s
            office_offset,
            shift_start,
            grace_period_minutes: parse_var("GRACE_PERIOD_MINUTES", "15")?,
            office_radius_meters,
        })
    }

    pub fn initial_settings(&self) -> EngineSettings {
        EngineSettings {
            schedule: self.shift_start.map(|shift_start| WorkScheduleConfig {
                shift_start,
                grace_period_minutes: self.grace_period_minutes,
            }),
            geofence: self
                .office_radius_meters
                .map(|radius_meters| OfficeGeofence { radius_meters }),
            office_offset: self.office_offset,
        }
    }

    pub fn now(&self) -> Instant {
        Utc::now().with_timezone(&self.office_offset)
    }
}
