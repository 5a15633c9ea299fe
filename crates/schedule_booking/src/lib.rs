// --- File: crates/schedule_booking/src/lib.rs ---

pub mod handlers; // Axum handlers for the schedule page
pub mod logic; // Page data, booking form, email and calendar side effects
pub mod routes;

#[cfg(test)]
mod test_support;

pub use handlers::ScheduleState;
pub use logic::{BookingError, ScheduleSettings};
pub use routes::routes;
