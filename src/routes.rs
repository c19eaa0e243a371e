use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Result, anyhow};

use crate::{api::attendance, config::Config};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer limiter for the feed endpoint. Built once so every worker shares
/// the same quota.
pub fn feed_limiter(requests_per_min: u32) -> Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow!("invalid feed rate limit: {requests_per_min}/min"))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, feed_limiter: &LimiterConfig) {
    let prefix = format!("{}/v1/attendance", config.api_prefix);

    cfg.service(
        web::scope(&prefix)
            // /derive
            .service(web::resource("/derive").route(web::post().to(attendance::derive_session)))
            // /feed
            .service(
                web::resource("/feed")
                    .wrap(Governor::new(feed_limiter))
                    .route(web::post().to(attendance::ingest_feed)),
            )
            // /sessions?date=
            .service(web::resource("/sessions").route(web::get().to(attendance::list_sessions)))
            // /summary?date=
            .service(web::resource("/summary").route(web::get().to(attendance::daily_summary)))
            // settings and roster
            .service(web::resource("/roster").route(web::put().to(attendance::replace_roster)))
            .service(web::resource("/schedule").route(web::put().to(attendance::set_schedule)))
            .service(web::resource("/geofence").route(web::put().to(attendance::set_geofence))),
    );
}
