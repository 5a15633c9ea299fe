// --- File: crates/schedule_mailgun/src/service.rs ---
use reqwest::Client;
use schedule_common::services::{BoxFuture, NotificationResult, NotificationService};
use schedule_common::{external_service_error, ScheduleError};
use schedule_config::MailgunConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Mailgun-specific error types.
#[derive(Error, Debug)]
pub enum MailgunError {
    /// Error occurred during a Mailgun API request
    #[error("Mailgun API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Mailgun API
    #[error("Mailgun API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete Mailgun configuration
    #[error("Mailgun configuration error: {0}")]
    ConfigError(String),
}

impl From<MailgunError> for ScheduleError {
    fn from(err: MailgunError) -> Self {
        match err {
            MailgunError::ConfigError(message) => ScheduleError::ConfigError(message),
            other => external_service_error("mailgun", other),
        }
    }
}

/// Body of a successful `POST /messages`.
#[derive(Deserialize, Debug)]
struct SendResponse {
    id: String,
    message: String,
}

/// Sends mail through the Mailgun HTTP API.
pub struct MailgunNotificationService {
    client: Client,
    config: MailgunConfig,
}

impl MailgunNotificationService {
    /// Create a new Mailgun notification service.
    pub fn new(config: MailgunConfig) -> Result<Self, MailgunError> {
        if config.api_key.is_empty() || config.api_key == schedule_config::SECRET_MARKER {
            return Err(MailgunError::ConfigError(
                "mailgun.api_key is not set (MAILGUN_API_KEY)".to_string(),
            ));
        }
        if config.domain.is_empty() {
            return Err(MailgunError::ConfigError(
                "mailgun.domain is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.domain
        )
    }
}

impl NotificationService for MailgunNotificationService {
    type Error = MailgunError;

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
            let params = [
                ("from", self.config.from.as_str()),
                ("to", to.as_str()),
                ("subject", subject.as_str()),
                ("text", body.as_str()),
            ];
            info!("Sending email to {}: {}", to, subject);

            let resp = self
                .client
                .post(self.messages_url())
                .basic_auth("api", Some(&self.config.api_key))
                .form(&params)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                error!("Mailgun returned {}: {}", status, message);
                return Err(MailgunError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            let sent: SendResponse = resp.json().await?;
            info!("Email queued by Mailgun: {}", sent.id);
            Ok(NotificationResult {
                id: sent.id,
                status: sent.message,
            })
        })
    }
}
