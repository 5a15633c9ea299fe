#[cfg(test)]
mod tests {
    use crate::logic::SlotComputer;
    use chrono::{Duration, TimeZone};
    use chrono_tz::{America::Denver, Tz};
    use proptest::prelude::*;
    use schedule_common::services::{CalendarEvent, EventKind, EventStatus, EventTime};
    use schedule_common::zoned::format_zoned;

    // January: no DST transition anywhere in the day
    fn at(hour: u32) -> chrono::DateTime<Tz> {
        Denver.with_ymd_and_hms(2025, 1, 15, hour, 0, 0).unwrap()
    }

    fn event(start: chrono::DateTime<Tz>, end: chrono::DateTime<Tz>, kind: EventKind) -> CalendarEvent {
        CalendarEvent {
            title: if kind == EventKind::Availability { "Free" } else { "Busy" }.to_string(),
            start: EventTime {
                date_time: start.to_rfc3339(),
                time_zone: None,
            },
            end: EventTime {
                date_time: end.to_rfc3339(),
                time_zone: None,
            },
            status: EventStatus::Confirmed,
            kind,
        }
    }

    proptest! {
        // An N-hour window with nothing booked offers N consecutive slots from its start
        #[test]
        fn test_free_window_offers_every_hour(start_hour in 0u32..23, span in 0u32..12) {
            let end_hour = (start_hour + span).min(23);
            let events = vec![event(at(start_hour), at(end_hour), EventKind::Availability)];

            let windows = SlotComputer::new(Denver).compute_available_slots(&events).unwrap();
            let times = &windows[0].times;

            prop_assert_eq!(times.len() as u32, end_hour - start_hour);
            for (i, slot) in times.iter().enumerate() {
                prop_assert!(!slot.reserved);
                prop_assert_eq!(&slot.time, &format_zoned(&(at(start_hour) + Duration::hours(i as i64))));
            }
        }

        // A busy event starting at offset k removes exactly that slot
        #[test]
        fn test_conflict_removes_exactly_one(start_hour in 0u32..12, span in 1u32..12, k_seed in 0u32..100) {
            let end_hour = start_hour + span;
            let k = k_seed % span;
            let conflict = at(start_hour + k);
            let events = vec![
                event(at(start_hour), at(end_hour), EventKind::Availability),
                event(conflict, conflict + Duration::hours(1), EventKind::Busy),
            ];

            let windows = SlotComputer::new(Denver).compute_available_slots(&events).unwrap();
            let times = &windows[0].times;

            prop_assert_eq!(times.len() as u32, span - 1);
            let conflict_time = format_zoned(&conflict);
            prop_assert!(times.iter().all(|s| s.time != conflict_time));
        }

        // Pure function: same input, same output; slots are strictly ascending
        #[test]
        fn test_idempotent_and_ascending(start_hour in 0u32..12, span in 0u32..12, busy_hour in 0u32..23) {
            let events = vec![
                event(at(start_hour), at(start_hour + span), EventKind::Availability),
                event(at(busy_hour), at(busy_hour) + Duration::hours(1), EventKind::Busy),
            ];
            let computer = SlotComputer::new(Denver);

            let first = computer.compute_available_slots(&events).unwrap();
            let second = computer.compute_available_slots(&events).unwrap();
            prop_assert_eq!(&first, &second);

            let times = &first[0].times;
            for pair in times.windows(2) {
                prop_assert!(pair[0].time < pair[1].time);
            }
        }
    }
}
