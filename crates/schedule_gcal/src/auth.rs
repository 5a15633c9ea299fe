// File: crates/schedule_gcal/src/auth.rs
use crate::service::GcalServiceError;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator},
    CalendarHub,
};
use schedule_config::GcalConfig;
use std::path::Path;
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds an authenticated Calendar client from the service account key at `key_path`.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, GcalServiceError> {
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| GcalServiceError::ConfigError("Missing key_path in GcalConfig".into()))?;

    let sa_key = read_service_account_key(Path::new(key_path))
        .await
        .map_err(|e| GcalServiceError::AuthError(format!("reading {}: {}", key_path, e)))?;

    let auth = ServiceAccountAuthenticator::builder(sa_key)
        .build()
        .await
        .map_err(|e| GcalServiceError::AuthError(e.to_string()))?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalServiceError::AuthError(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    info!("Google Calendar client ready (key: {})", key_path);
    Ok(CalendarHub::new(client, auth))
}
