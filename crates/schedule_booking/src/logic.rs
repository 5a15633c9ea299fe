// --- File: crates/schedule_booking/src/logic.rs ---

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use schedule_common::services::{
    BoxedError, CalendarService, EventStatus, NewCalendarEvent, NotificationService,
};
use schedule_common::zoned::parse_zoned;
use schedule_common::{external_service_error, ScheduleError};
use schedule_config::AppConfig;
use schedule_gcal::{SlotComputer, WindowSlots};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::handlers::SCHEDULE_PATH;

pub const EMAIL_SUBJECT: &str = "New Meeting Request";

// --- Error Handling for Bookings ---
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid booking form: {0}")]
    InvalidForm(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Calendar error: {0}")]
    Calendar(#[source] BoxedError),

    #[error("Email delivery failed: {0}")]
    Notification(#[source] BoxedError),

    #[error("Internal booking error: {0}")]
    InternalError(String),
}

impl From<BookingError> for ScheduleError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidForm(msg) => ScheduleError::ValidationError(msg),
            BookingError::ConfigError(msg) => ScheduleError::ConfigError(msg),
            BookingError::Calendar(e) => external_service_error("calendar", e),
            BookingError::Notification(e) => external_service_error("email", e),
            BookingError::InternalError(msg) => ScheduleError::InternalError(msg),
        }
    }
}

// --- Settings resolved once at startup ---

/// Everything the schedule page needs from [`AppConfig`], validated.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub calendar_id: String,
    pub max_results: i32,
    /// Receives one email per booking request.
    pub operator_email: String,
    pub time_zone: Tz,
    pub booking_duration: Duration,
    pub reserved_path: String,
}

impl ScheduleSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, BookingError> {
        let gcal = config
            .gcal
            .as_ref()
            .ok_or_else(|| BookingError::ConfigError("gcal section missing".to_string()))?;
        let calendar_id = gcal
            .calendar_id
            .clone()
            .ok_or_else(|| BookingError::ConfigError("gcal.calendar_id missing".to_string()))?;
        let mailgun = config
            .mailgun
            .as_ref()
            .ok_or_else(|| BookingError::ConfigError("mailgun section missing".to_string()))?;
        let time_zone: Tz = config.schedule.time_zone.parse().map_err(|_| {
            BookingError::ConfigError(format!(
                "unknown schedule.time_zone {:?}",
                config.schedule.time_zone
            ))
        })?;
        if config.schedule.booking_duration_minutes <= 0 {
            return Err(BookingError::ConfigError(
                "schedule.booking_duration_minutes must be positive".to_string(),
            ));
        }
        validate_reserved_path(&config.schedule.reserved_path)?;

        Ok(Self {
            calendar_id,
            max_results: gcal.max_results,
            operator_email: mailgun.to.clone(),
            time_zone,
            booking_duration: Duration::minutes(config.schedule.booking_duration_minutes),
            reserved_path: config.schedule.reserved_path.clone(),
        })
    }
}

/// The confirmation page is mounted as a plain static route next to `/schedule` and `/`.
fn validate_reserved_path(path: &str) -> Result<(), BookingError> {
    let invalid = |reason: &str| -> Result<(), BookingError> {
        Err(BookingError::ConfigError(format!(
            "schedule.reserved_path {:?} {}",
            path, reason
        )))
    };
    if !path.starts_with('/') {
        return invalid("must start with '/'");
    }
    if path == "/" || path == SCHEDULE_PATH {
        return invalid("collides with an existing route");
    }
    if path.contains(['{', '}', ':', '*', '?', '#']) {
        return invalid("must be a literal path");
    }
    Ok(())
}

// --- Page Load ---

/// Data handed to the schedule page.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SchedulePage {
    pub events: Vec<WindowSlots>,
}

/// Midnight of `now`'s calendar day in `tz`, as a UTC instant.
pub fn start_of_today(now: DateTime<Utc>, tz: Tz) -> Result<DateTime<Utc>, BookingError> {
    let midnight = now.with_timezone(&tz).date_naive().and_time(NaiveTime::MIN);
    // Zones that jump over midnight start the day an hour later
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| BookingError::InternalError(format!("no local midnight on {}", midnight)))
}

/// Fetches upcoming events and computes the open slots of every availability window.
///
/// A window whose own start or end cannot be read is logged and left out; the rest still
/// render.
pub async fn load_schedule(
    calendar: &dyn CalendarService<Error = BoxedError>,
    settings: &ScheduleSettings,
    slot_computer: &SlotComputer,
    now: DateTime<Utc>,
) -> Result<SchedulePage, BookingError> {
    let time_min = start_of_today(now, settings.time_zone)?;
    let events = calendar
        .list_upcoming_events(&settings.calendar_id, time_min, settings.max_results)
        .await
        .map_err(BookingError::Calendar)?;
    debug!("Loaded {} calendar events since {}", events.len(), time_min);

    let windows = slot_computer
        .compute_each_window(&events)
        .into_iter()
        .filter_map(|result| match result {
            Ok(window) => Some(window),
            Err(e) => {
                warn!("Skipping availability window: {}", e);
                None
            }
        })
        .collect();

    Ok(SchedulePage { events: windows })
}

// --- Booking Submission ---

/// The urlencoded booking form exactly as posted by the page.
#[derive(Deserialize, Debug, Clone)]
pub struct BookingForm {
    pub date: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    pub name: String,
    pub email: String,
    pub service: String,
}

/// A booking form whose start time has been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// Display date chosen on the page; passed through to the email untouched.
    pub date: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub name: String,
    pub email: String,
    pub service: String,
}

impl BookingRequest {
    pub fn from_form(form: BookingForm, duration: Duration) -> Result<Self, BookingError> {
        let start = parse_zoned(form.start_time.trim())
            .map_err(|e| BookingError::InvalidForm(format!("startTime: {}", e)))?;
        Ok(Self {
            date: form.date,
            end: start + duration,
            start,
            name: form.name,
            email: form.email,
            service: form.service,
        })
    }
}

/// Result of a booking where both the email and the calendar insert went through.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub email_id: String,
    pub event_id: Option<String>,
}

/// Hour of day in 12-hour form, e.g. `9 AM`, in the slot's own zone.
pub fn format_hour_12(dt: &DateTime<Tz>) -> String {
    dt.format("%-I %p").to_string()
}

pub fn compose_email_body(request: &BookingRequest) -> String {
    format!(
        "Date: {}\nTime: {}\nName: {}\nEmail: {}\nService: {}",
        request.date,
        format_hour_12(&request.start),
        request.name,
        request.email,
        request.service
    )
}

/// Tentative event, titled `"{name} - {service}"`, in the requester's zone.
pub fn build_calendar_event(request: &BookingRequest) -> NewCalendarEvent {
    NewCalendarEvent {
        summary: format!("{} - {}", request.name, request.service),
        start: request.start,
        end: request.end,
        status: EventStatus::Tentative,
    }
}

/// Emails the operator and inserts the tentative event, concurrently.
///
/// Both calls always run to completion. If both fail, the email error is returned and
/// the calendar error is logged.
pub async fn submit_booking(
    calendar: &dyn CalendarService<Error = BoxedError>,
    notifier: &dyn NotificationService<Error = BoxedError>,
    settings: &ScheduleSettings,
    request: &BookingRequest,
) -> Result<BookingOutcome, BookingError> {
    let body = compose_email_body(request);
    let event = build_calendar_event(request);
    info!("Booking request from {} for {}", request.email, event.summary);

    let (email, inserted) = tokio::join!(
        notifier.send_email(&settings.operator_email, EMAIL_SUBJECT, &body),
        calendar.insert_event(&settings.calendar_id, event, true),
    );

    match (email, inserted) {
        (Ok(email), Ok(inserted)) => {
            info!(
                "Booking recorded: email {} / event {:?}",
                email.id, inserted.event_id
            );
            Ok(BookingOutcome {
                email_id: email.id,
                event_id: inserted.event_id,
            })
        }
        (Err(email_err), inserted) => {
            error!("Booking email failed: {}", email_err);
            if let Err(insert_err) = inserted {
                error!("Booking calendar insert failed: {}", insert_err);
            }
            Err(BookingError::Notification(email_err))
        }
        (Ok(_), Err(insert_err)) => {
            error!("Booking calendar insert failed: {}", insert_err);
            Err(BookingError::Calendar(insert_err))
        }
    }
}
