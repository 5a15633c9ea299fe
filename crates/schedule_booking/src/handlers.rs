// --- File: crates/schedule_booking/src/handlers.rs ---

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Json, Redirect, Response},
    Form,
};
use chrono::Utc;
use schedule_common::handle_json_result;
use schedule_common::services::{BoxedError, CalendarService, NotificationService};
use schedule_common::ScheduleError;
use schedule_gcal::SlotComputer;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::logic::{
    load_schedule, submit_booking, BookingForm, BookingRequest, SchedulePage, ScheduleSettings,
};

pub const SCHEDULE_PATH: &str = "/schedule";
pub const BOOKING_FAILED_REDIRECT: &str = "/schedule?error=booking_failed";
pub const INVALID_FORM_REDIRECT: &str = "/schedule?error=invalid_form";

// --- State for Schedule Handlers ---
#[derive(Clone)]
pub struct ScheduleState {
    pub settings: ScheduleSettings,
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    pub notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    pub slot_computer: SlotComputer,
}

impl ScheduleState {
    pub fn new(
        settings: ScheduleSettings,
        calendar: Arc<dyn CalendarService<Error = BoxedError>>,
        notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    ) -> Self {
        Self {
            slot_computer: SlotComputer::new(settings.time_zone),
            settings,
            calendar,
            notifier,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ReservedResponse {
    pub message: String,
}

/// `GET /schedule`: open slots of every upcoming availability window.
#[axum::debug_handler]
pub async fn load_schedule_handler(
    State(state): State<Arc<ScheduleState>>,
) -> Result<Json<SchedulePage>, Response> {
    let result = load_schedule(
        state.calendar.as_ref(),
        &state.settings,
        &state.slot_computer,
        Utc::now(),
    )
    .await
    .map_err(ScheduleError::from);
    handle_json_result(result)
}

/// `POST /schedule`: books the posted slot and redirects (303) to the outcome page.
#[axum::debug_handler]
pub async fn submit_booking_handler(
    State(state): State<Arc<ScheduleState>>,
    form: Result<Form<BookingForm>, FormRejection>,
) -> Redirect {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!("Rejected booking form: {}", rejection.body_text());
            return Redirect::to(INVALID_FORM_REDIRECT);
        }
    };

    let request = match BookingRequest::from_form(form, state.settings.booking_duration) {
        Ok(request) => request,
        Err(e) => {
            warn!("{}", e);
            return Redirect::to(INVALID_FORM_REDIRECT);
        }
    };

    match submit_booking(
        state.calendar.as_ref(),
        state.notifier.as_ref(),
        &state.settings,
        &request,
    )
    .await
    {
        Ok(outcome) => {
            info!("Booking confirmed (event {:?})", outcome.event_id);
            Redirect::to(&state.settings.reserved_path)
        }
        Err(_) => Redirect::to(BOOKING_FAILED_REDIRECT),
    }
}

/// `GET /schedule/reserved`
pub async fn reserved_handler() -> Json<ReservedResponse> {
    Json(ReservedResponse {
        message: "Thanks! Your meeting request has been received and is pending confirmation."
            .to_string(),
    })
}
