// --- File: crates/schedule_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Google Calendar Config ---
// The service account key is read from `key_path`; nothing secret lives in here.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    pub key_path: Option<String>,    // Mandatory
    pub calendar_id: Option<String>, // Mandatory
    /// Upper bound on events fetched for the schedule page.
    #[serde(default = "default_max_results")]
    pub max_results: i32,
    /// Event title that marks a block as open for booking.
    #[serde(default = "default_availability_title")]
    pub availability_title: String,
}

fn default_max_results() -> i32 {
    10
}

fn default_availability_title() -> String {
    "Free".to_string()
}

// --- Mailgun Config ---
// api_key is usually set to "secret_from_env" and resolved from MAILGUN_API_KEY.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailgunConfig {
    pub api_key: String,
    pub domain: String,
    /// Sender address, e.g. "mailgun@sandbox.mailgun.org"
    pub from: String,
    /// Operator address that receives booking requests.
    pub to: String,
    #[serde(default = "default_mailgun_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_mailgun_base_url() -> String {
    "https://api.mailgun.net/v3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

// --- Schedule Page Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleConfig {
    /// IANA zone used for "today", same-day checks and slot strings.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Where a successful booking redirects to.
    #[serde(default = "default_reserved_path")]
    pub reserved_path: String,
    /// Length of a booked appointment.
    #[serde(default = "default_booking_duration_minutes")]
    pub booking_duration_minutes: i64,
}

fn default_time_zone() -> String {
    "America/Denver".to_string()
}

fn default_reserved_path() -> String {
    "/schedule/reserved".to_string()
}

fn default_booking_duration_minutes() -> i64 {
    60
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            reserved_path: default_reserved_path(),
            booking_duration_minutes: default_booking_duration_minutes(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directive understood by tracing's EnvFilter, e.g. "info" or "schedule_gcal=debug".
    pub level: Option<String>,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_mailgun: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub mailgun: Option<MailgunConfig>,

    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}
