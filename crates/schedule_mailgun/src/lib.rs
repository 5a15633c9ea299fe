// --- File: crates/schedule_mailgun/src/lib.rs ---
pub mod service;
#[cfg(test)]
mod service_test;

pub use service::{MailgunError, MailgunNotificationService};
