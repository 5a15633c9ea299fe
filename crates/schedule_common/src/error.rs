// --- File: crates/schedule_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all schedule crates.
///
/// Feature crates keep their own error enums and implement `From<TheirError> for ScheduleError`
/// so handlers can map everything to a single HTTP representation.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation of caller input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ScheduleError {
    fn status_code(&self) -> u16 {
        match self {
            ScheduleError::ConfigError(_) => 500,
            ScheduleError::ValidationError(_) => 400,
            ScheduleError::ExternalServiceError { .. } => 502,
            ScheduleError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, ScheduleError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, ScheduleError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, ScheduleError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| ScheduleError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ScheduleError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| ScheduleError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ScheduleError {
    ScheduleError::ConfigError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ScheduleError {
    ScheduleError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ScheduleError::ValidationError("missing name".to_string()).status_code(),
            400
        );
        assert_eq!(config_error("no calendar id").status_code(), 500);
        assert_eq!(external_service_error("mailgun", "401").status_code(), 502);
    }

    #[test]
    fn test_external_service_error_message() {
        let err = external_service_error("google-calendar", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "External service error: google-calendar - quota exceeded"
        );
    }

    #[test]
    fn test_context_wraps_as_internal_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "key.json",
        ));
        let err = result.context("reading service account key").unwrap_err();
        assert!(matches!(err, ScheduleError::InternalError(_)));
        assert!(err.to_string().contains("reading service account key: key.json"));
    }
}
