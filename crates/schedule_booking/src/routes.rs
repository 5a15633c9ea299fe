// --- File: crates/schedule_booking/src/routes.rs ---

use crate::handlers::{
    load_schedule_handler, reserved_handler, submit_booking_handler, ScheduleState, SCHEDULE_PATH,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tracing::info;

/// Creates a router with the schedule page, its form action and the confirmation page.
pub fn routes(state: Arc<ScheduleState>) -> Router {
    info!(
        "💡 Schedule: {} (GET, POST), {} (GET)",
        SCHEDULE_PATH, state.settings.reserved_path
    );
    let reserved_path = state.settings.reserved_path.clone();

    Router::new()
        .route(
            SCHEDULE_PATH,
            get(load_schedule_handler).post(submit_booking_handler),
        )
        .route(&reserved_path, get(reserved_handler))
        .with_state(state)
}
