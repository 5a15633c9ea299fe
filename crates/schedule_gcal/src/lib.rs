// --- File: crates/schedule_gcal/src/lib.rs ---
pub mod auth;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;

pub use logic::{Slot, SlotComputer, SlotError, WindowSlots};
pub use service::{GcalServiceError, GoogleCalendarService};
