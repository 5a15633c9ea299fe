// --- File: crates/schedule_gcal/src/logic.rs ---
use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;
use schedule_common::services::{CalendarEvent, EventKind, EventTime};
use schedule_common::zoned::{format_zoned, parse_absolute_in, ZonedParseError};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("event {title:?} has an unreadable {field} timestamp: {source}")]
    MalformedEvent {
        title: String,
        field: &'static str,
        source: ZonedParseError,
    },
}

// --- Data Structures ---

/// One candidate one-hour booking opportunity.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Zoned string, e.g. `2025-06-02T09:00:00-06:00[America/Denver]`
    pub time: String,
    pub reserved: bool,
}

/// An availability window together with its open slots, as handed to the page template.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowSlots {
    pub summary: String,
    /// Window start exactly as delivered by the calendar.
    pub start: String,
    /// Window end exactly as delivered by the calendar.
    pub end: String,
    pub times: Vec<Slot>,
}

// --- Slot Computation ---

/// Turns a day's calendar events into bookable hourly slots.
///
/// All day and hour arithmetic happens in `time_zone`. Pure: no clock, no I/O.
#[derive(Debug, Clone, Copy)]
pub struct SlotComputer {
    time_zone: Tz,
}

impl SlotComputer {
    pub fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }

    /// Events that open time for booking, in input order.
    pub fn availability_windows(
        events: &[CalendarEvent],
    ) -> impl Iterator<Item = &CalendarEvent> {
        events
            .iter()
            .filter(|event| event.kind == EventKind::Availability)
    }

    /// Computes open slots for every availability window.
    ///
    /// Fails with the first [`SlotError`]; use [`Self::compute_each_window`] to keep
    /// the windows that could be computed.
    pub fn compute_available_slots(
        &self,
        events: &[CalendarEvent],
    ) -> Result<Vec<WindowSlots>, SlotError> {
        self.compute_each_window(events).into_iter().collect()
    }

    /// One result per availability window, in input order.
    ///
    /// Busy events are read once. One whose start cannot be parsed has no calendar day,
    /// so it cannot conflict with any window; it is logged and ignored.
    pub fn compute_each_window(
        &self,
        events: &[CalendarEvent],
    ) -> Vec<Result<WindowSlots, SlotError>> {
        let busy_starts = self.busy_starts(events);
        Self::availability_windows(events)
            .map(|window| self.compute_window_slots(window, &busy_starts))
            .collect()
    }

    /// Start instants of all readable busy events.
    pub fn busy_starts(&self, events: &[CalendarEvent]) -> Vec<DateTime<Tz>> {
        events
            .iter()
            .filter(|e| e.kind == EventKind::Busy)
            .filter_map(|event| match self.parse(&event.start, &event.title, "start") {
                Ok(start) => Some(start),
                Err(e) => {
                    warn!("Ignoring busy event: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Open slots of a single window, given the busy starts from [`Self::busy_starts`].
    ///
    /// The number of candidates is the difference of the hour-of-day of end and start.
    /// A window crossing midnight or ending on a half hour is not adjusted; a span of
    /// zero or less yields no slots.
    pub fn compute_window_slots(
        &self,
        window: &CalendarEvent,
        busy_starts: &[DateTime<Tz>],
    ) -> Result<WindowSlots, SlotError> {
        let start = self.parse(&window.start, &window.title, "start")?;
        let end = self.parse(&window.end, &window.title, "end")?;
        let hour_span = i64::from(end.hour()) - i64::from(start.hour());

        let day = start.date_naive();
        let reserved: HashSet<String> = busy_starts
            .iter()
            .filter(|busy| busy.date_naive() == day)
            .map(format_zoned)
            .collect();

        let times: Vec<Slot> = (0..hour_span.max(0))
            .map(|offset| {
                let time = format_zoned(&(start + Duration::hours(offset)));
                Slot {
                    reserved: reserved.contains(&time),
                    time,
                }
            })
            .filter(|slot| !slot.reserved)
            .collect();

        debug!(
            "Window {} - {}: {} of {} slots open",
            window.start.date_time,
            window.end.date_time,
            times.len(),
            hour_span.max(0)
        );

        Ok(WindowSlots {
            summary: window.title.clone(),
            start: window.start.date_time.clone(),
            end: window.end.date_time.clone(),
            times,
        })
    }

    fn parse(
        &self,
        time: &EventTime,
        title: &str,
        field: &'static str,
    ) -> Result<DateTime<Tz>, SlotError> {
        parse_absolute_in(&time.date_time, &self.time_zone).map_err(|source| {
            SlotError::MalformedEvent {
                title: title.to_string(),
                field,
                source,
            }
        })
    }
}
