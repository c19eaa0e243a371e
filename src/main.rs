use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use hrm_attendance::config::Config;
use hrm_attendance::docs::ApiDoc;
use hrm_attendance::feed::{SessionBoard, consumer, run_consumer};
use hrm_attendance::routes;
use hrm_attendance::settings::SettingsStore;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendance.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(
        addr = %config.server_addr,
        office_offset = %config.office_offset,
        "Server starting..."
    );

    let settings = Arc::new(SettingsStore::new(config.initial_settings()));
    let board = Arc::new(SessionBoard::new());
    let (sender, receiver) = consumer::channel();
    let feed_limiter = routes::feed_limiter(config.rate_feed_per_min)?;

    // Clone what the consumer needs before the server factory takes ownership
    let consumer_board = board.clone();
    let consumer_settings = settings.clone();
    let clock = config.clone();

    actix_web::rt::spawn(async move {
        run_consumer(receiver, consumer_board, consumer_settings, move || {
            clock.now()
        })
        .await;
    });

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(board.clone()))
            .app_data(Data::from(settings.clone()))
            .app_data(Data::new(sender.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, &config, &feed_limiter))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
