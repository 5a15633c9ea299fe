// --- File: crates/schedule_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for Google Calendar.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventDateTime};
use schedule_common::services::{
    BoxFuture, CalendarEvent, CalendarEventResult, CalendarService, EventKind, EventStatus,
    EventTime, NewCalendarEvent,
};
use schedule_common::{external_service_error, ScheduleError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Google authentication failed: {0}")]
    AuthError(String),
    #[error("Google Calendar configuration error: {0}")]
    ConfigError(String),
}

impl From<GcalServiceError> for ScheduleError {
    fn from(err: GcalServiceError) -> Self {
        match err {
            GcalServiceError::ConfigError(message) => ScheduleError::ConfigError(message),
            other => external_service_error("google-calendar", other),
        }
    }
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    availability_title: String,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    ///
    /// Events titled `availability_title` are reported as [`EventKind::Availability`].
    pub fn new(calendar_hub: Arc<HubType>, availability_title: impl Into<String>) -> Self {
        Self {
            calendar_hub,
            availability_title: availability_title.into(),
        }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists upcoming events with `singleEvents=true`, `showDeleted=false`,
    /// `orderBy=startTime`.
    ///
    /// All-day events carry no `dateTime` and are skipped; they never start on an hour
    /// boundary and cannot open a window.
    fn list_upcoming_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: i32,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let (_response, events_list) = calendar_hub
                .events()
                .list(&calendar_id)
                .show_deleted(false)
                .single_events(true)
                .max_results(max_results)
                .time_min(time_min)
                .order_by("startTime")
                .doit()
                .await?;

            let events: Vec<CalendarEvent> = events_list
                .items
                .unwrap_or_default()
                .into_iter()
                .filter_map(|event| to_calendar_event(event, &self.availability_title))
                .collect();

            debug!(
                "Fetched {} events from calendar {} since {}",
                events.len(),
                calendar_id,
                time_min
            );
            Ok(events)
        })
    }

    /// Inserts the event; times are sent as UTC instants together with the booking's
    /// IANA zone so Google displays them in the requester's zone.
    fn insert_event(
        &self,
        calendar_id: &str,
        event: NewCalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let new_event = to_google_event(&event);

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .send_updates(if notify_attendees { "all" } else { "none" })
                .doit()
                .await?;

            info!(
                "Inserted event {:?} ({}) into {}",
                created_event.id, event.summary, calendar_id
            );
            Ok(CalendarEventResult {
                event_id: created_event.id,
                status: created_event
                    .status
                    .unwrap_or_else(|| event.status.as_str().to_string()),
            })
        })
    }
}

/// Maps an API event into the domain type. Returns `None` for all-day events.
///
/// An event without any start/end keeps an empty timestamp, which the slot computation
/// reports as malformed.
pub fn to_calendar_event(event: Event, availability_title: &str) -> Option<CalendarEvent> {
    let title = event.summary.unwrap_or_default();
    let is_all_day = |t: &Option<EventDateTime>| {
        t.as_ref()
            .is_some_and(|t| t.date_time.is_none() && t.date.is_some())
    };
    if is_all_day(&event.start) || is_all_day(&event.end) {
        debug!("Skipping all-day event {:?}", title);
        return None;
    }

    let to_time = |t: Option<EventDateTime>| match t {
        Some(t) => EventTime {
            date_time: t.date_time.map(|dt| dt.to_rfc3339()).unwrap_or_default(),
            time_zone: t.time_zone,
        },
        None => EventTime {
            date_time: String::new(),
            time_zone: None,
        },
    };

    Some(CalendarEvent {
        kind: EventKind::from_title(&title, availability_title),
        status: EventStatus::from(event.status.as_deref().unwrap_or("confirmed")),
        start: to_time(event.start),
        end: to_time(event.end),
        title,
    })
}

/// Builds the API payload for an insert.
pub fn to_google_event(event: &NewCalendarEvent) -> Event {
    let time_zone = event.start.timezone().name().to_string();
    Event {
        summary: Some(event.summary.clone()),
        status: Some(event.status.as_str().to_string()),
        start: Some(EventDateTime {
            date_time: Some(event.start.with_timezone(&Utc)),
            time_zone: Some(time_zone.clone()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(event.end.with_timezone(&Utc)),
            time_zone: Some(time_zone),
            ..Default::default()
        }),
        ..Default::default()
    }
}
