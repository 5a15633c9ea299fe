// File: services/schedule_backend/src/main.rs
mod service_factory;

use axum::{routing::get, Router};
use schedule_booking::{ScheduleSettings, ScheduleState};
use schedule_common::{init_with_config, Context, ScheduleError};
use schedule_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service_factory::ScheduleServiceFactory;

#[tokio::main]
async fn main() -> Result<(), ScheduleError> {
    let config = Arc::new(load_config().context("Failed to load config")?);
    let _log_guard = init_with_config(config.logging.as_ref());

    let settings = ScheduleSettings::from_config(&config)?;
    let services = ScheduleServiceFactory::new(&config).await?;
    let state = Arc::new(ScheduleState::new(
        settings,
        services.calendar_service(),
        services.notification_service(),
    ));

    let app = Router::new()
        .route("/", get(|| async { "Schedule service" }))
        .merge(schedule_booking::routes(state))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("Schedule page available at http://{}/schedule", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
