// --- File: crates/schedule_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The schedule page talks to two collaborators: a calendar (read upcoming events,
//! insert a booking) and a mail transport. Both are traits so handlers can be driven
//! by in-memory fakes in tests and by the Google / Mailgun clients in production.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Calendar read/write operations used by the schedule page.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Up to `max_results` upcoming, non-deleted, single-instance events starting at
    /// or after `time_min`, ordered by start time.
    fn list_upcoming_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: i32,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error>;

    /// Insert one event; `notify_attendees` maps to `sendUpdates=all`.
    fn insert_event(
        &self,
        calendar_id: &str,
        event: NewCalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error>;
}

/// Outgoing mail.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a plaintext email.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// Adapts any [`CalendarService`] to one returning [`BoxedError`], so it can be stored
/// as `Arc<dyn CalendarService<Error = BoxedError>>`.
pub struct BoxedCalendarService<S>(pub S);

impl<S: CalendarService> CalendarService for BoxedCalendarService<S> {
    type Error = BoxedError;

    fn list_upcoming_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: i32,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.0
                .list_upcoming_events(&calendar_id, time_min, max_results)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }

    fn insert_event(
        &self,
        calendar_id: &str,
        event: NewCalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        let calendar_id = calendar_id.to_string();
        Box::pin(async move {
            self.0
                .insert_event(&calendar_id, event, notify_attendees)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Adapts any [`NotificationService`] to one returning [`BoxedError`].
pub struct BoxedNotificationService<S>(pub S);

impl<S: NotificationService> NotificationService for BoxedNotificationService<S> {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        Box::pin(async move {
            self.0
                .send_email(&to, &subject, &body)
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Whether a calendar entry opens time for booking or blocks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// An AvailabilityWindow: hourly slots are generated inside it.
    Availability,
    /// Anything else on the calendar.
    Busy,
}

impl EventKind {
    /// Classifies by title; the calendar integration decides what the marker title is.
    pub fn from_title(title: &str, availability_title: &str) -> Self {
        if title == availability_title {
            EventKind::Availability
        } else {
            EventKind::Busy
        }
    }
}

/// Event status as reported by the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
    Other(String),
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Confirmed => "confirmed",
            EventStatus::Tentative => "tentative",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for EventStatus {
    fn from(value: &str) -> Self {
        match value {
            "confirmed" => EventStatus::Confirmed,
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            other => EventStatus::Other(other.to_string()),
        }
    }
}

/// One side of an event's time range, as delivered by the calendar.
///
/// `date_time` is kept as the raw RFC 3339 string; it is only parsed during slot
/// computation so a single bad entry can be reported against its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: Option<String>,
}

/// A block of time on the shared calendar. Read-only for the schedule page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    pub status: EventStatus,
    pub kind: EventKind,
}

/// An event to be inserted by a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalendarEvent {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub status: EventStatus,
}

/// Represents the result of a calendar event operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    /// The ID of the event.
    pub event_id: Option<String>,
    /// The status of the event.
    pub status: String,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Provider message id.
    pub id: String,
    /// Provider status text.
    pub status: String,
}
