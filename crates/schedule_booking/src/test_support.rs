// In-memory stand-ins for the calendar and the mail transport.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::America::Denver;
use schedule_common::services::{
    BoxFuture, BoxedError, CalendarEvent, CalendarEventResult, CalendarService, EventKind,
    EventStatus, EventTime, NewCalendarEvent, NotificationResult, NotificationService,
};
use std::sync::Mutex;

use crate::logic::ScheduleSettings;

fn offline(what: &str) -> BoxedError {
    BoxedError(Box::new(std::io::Error::other(format!("{} offline", what))))
}

pub fn settings() -> ScheduleSettings {
    ScheduleSettings {
        calendar_id: "bookings@group.calendar.google.com".to_string(),
        max_results: 10,
        operator_email: "owner@example.org".to_string(),
        time_zone: Denver,
        booking_duration: Duration::hours(1),
        reserved_path: "/schedule/reserved".to_string(),
    }
}

pub fn event(title: &str, start: &str, end: &str, kind: EventKind) -> CalendarEvent {
    CalendarEvent {
        title: title.to_string(),
        start: EventTime {
            date_time: start.to_string(),
            time_zone: Some("America/Denver".to_string()),
        },
        end: EventTime {
            date_time: end.to_string(),
            time_zone: Some("America/Denver".to_string()),
        },
        status: EventStatus::Confirmed,
        kind,
    }
}

#[derive(Default)]
pub struct FakeCalendar {
    pub events: Vec<CalendarEvent>,
    pub fail_list: bool,
    pub fail_insert: bool,
    pub list_calls: Mutex<Vec<(String, DateTime<Utc>, i32)>>,
    pub inserted: Mutex<Vec<(String, NewCalendarEvent, bool)>>,
}

impl FakeCalendar {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }
}

impl CalendarService for FakeCalendar {
    type Error = BoxedError;

    fn list_upcoming_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: i32,
    ) -> BoxFuture<'_, Vec<CalendarEvent>, Self::Error> {
        self.list_calls
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), time_min, max_results));
        Box::pin(async move {
            if self.fail_list {
                return Err(offline("calendar"));
            }
            Ok(self.events.clone())
        })
    }

    fn insert_event(
        &self,
        calendar_id: &str,
        event: NewCalendarEvent,
        notify_attendees: bool,
    ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
        self.inserted
            .lock()
            .unwrap()
            .push((calendar_id.to_string(), event.clone(), notify_attendees));
        Box::pin(async move {
            if self.fail_insert {
                return Err(offline("calendar"));
            }
            Ok(CalendarEventResult {
                event_id: Some("evt-1".to_string()),
                status: event.status.as_str().to_string(),
            })
        })
    }
}

#[derive(Default)]
pub struct FakeMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl NotificationService for FakeMailer {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Box::pin(async move {
            if self.fail {
                return Err(offline("mail"));
            }
            Ok(NotificationResult {
                id: "<msg-1@example.org>".to_string(),
                status: "Queued. Thank you.".to_string(),
            })
        })
    }
}
