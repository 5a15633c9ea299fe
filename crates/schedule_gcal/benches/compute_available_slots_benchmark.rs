use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::{America::Denver, Tz};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use schedule_common::services::{CalendarEvent, EventKind, EventStatus, EventTime};
use schedule_gcal::logic::SlotComputer;

fn event(start: DateTime<Tz>, end: DateTime<Tz>, kind: EventKind) -> CalendarEvent {
    CalendarEvent {
        title: match kind {
            EventKind::Availability => "Free".to_string(),
            EventKind::Busy => "Client".to_string(),
        },
        start: EventTime {
            date_time: start.to_rfc3339(),
            time_zone: Some("America/Denver".to_string()),
        },
        end: EventTime {
            date_time: end.to_rfc3339(),
            time_zone: Some("America/Denver".to_string()),
        },
        status: EventStatus::Confirmed,
        kind,
    }
}

// One 9-17 window per day for `days` days, with a busy hour every other hour
fn create_week(days: i64) -> Vec<CalendarEvent> {
    let first_day = Denver.with_ymd_and_hms(2025, 1, 13, 9, 0, 0).unwrap();
    let mut events = Vec::new();
    for day in 0..days {
        let start = first_day + Duration::days(day);
        events.push(event(start, start + Duration::hours(8), EventKind::Availability));
        for hour in (0..8).step_by(2) {
            let busy = start + Duration::hours(hour);
            events.push(event(busy, busy + Duration::hours(1), EventKind::Busy));
        }
    }
    events
}

fn benchmark_compute_available_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_available_slots");
    let computer = SlotComputer::new(Denver);

    let single = create_week(1);
    group.bench_function("single_day", |b| {
        b.iter(|| computer.compute_available_slots(black_box(&single)))
    });

    let week = create_week(7);
    group.bench_function("one_week", |b| {
        b.iter(|| computer.compute_available_slots(black_box(&week)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_compute_available_slots);
criterion_main!(benches);
