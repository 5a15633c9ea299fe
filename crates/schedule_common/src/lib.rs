// --- File: crates/schedule_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions
pub mod zoned; // Zoned timestamp strings

// Re-export error types and utilities for easier access
pub use error::{config_error, external_service_error, Context, HttpStatusCode, ScheduleError};

pub use http::{handle_json_result, IntoHttpResponse};

pub use logging::{init_with_config, log_result};
