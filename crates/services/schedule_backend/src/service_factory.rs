// --- File: crates/services/schedule_backend/src/service_factory.rs ---
//! Builds the external services the schedule page depends on.
use schedule_common::services::{
    BoxedCalendarService, BoxedError, BoxedNotificationService, CalendarService,
    NotificationService,
};
use schedule_common::{config_error, log_result, ScheduleError};
use schedule_config::AppConfig;
use schedule_gcal::{auth::create_calendar_hub, GoogleCalendarService};
use schedule_mailgun::MailgunNotificationService;
use std::sync::Arc;
use tracing::info;

/// Owns the live calendar and mail clients, type-erased to `BoxedError` so handlers
/// can hold them as trait objects.
pub struct ScheduleServiceFactory {
    calendar_service: Arc<dyn CalendarService<Error = BoxedError>>,
    notification_service: Arc<dyn NotificationService<Error = BoxedError>>,
}

impl ScheduleServiceFactory {
    /// Create both services. Fails if either is disabled or misconfigured.
    pub async fn new(config: &AppConfig) -> Result<Self, ScheduleError> {
        let gcal_config = match (config.use_gcal, config.gcal.as_ref()) {
            (true, Some(gcal)) => gcal,
            _ => return Err(config_error("use_gcal must be true and [gcal] configured")),
        };
        let mailgun_config = match (config.use_mailgun, config.mailgun.as_ref()) {
            (true, Some(mailgun)) => mailgun.clone(),
            _ => {
                return Err(config_error(
                    "use_mailgun must be true and [mailgun] configured",
                ))
            }
        };

        info!("ℹ️ Initializing Google Calendar service...");
        let hub = log_result(
            create_calendar_hub(gcal_config).await,
            "✅ Google Calendar service initialized",
            "❌ Failed to create Google Calendar hub",
        )?;
        let calendar = GoogleCalendarService::new(
            Arc::new(hub),
            gcal_config.availability_title.clone(),
        );

        info!("ℹ️ Initializing Mailgun notification service...");
        let mailer = log_result(
            MailgunNotificationService::new(mailgun_config),
            "✅ Mailgun notification service initialized",
            "❌ Failed to create Mailgun client",
        )?;

        Ok(Self {
            calendar_service: Arc::new(BoxedCalendarService(calendar)),
            notification_service: Arc::new(BoxedNotificationService(mailer)),
        })
    }

    pub fn calendar_service(&self) -> Arc<dyn CalendarService<Error = BoxedError>> {
        self.calendar_service.clone()
    }

    pub fn notification_service(&self) -> Arc<dyn NotificationService<Error = BoxedError>> {
        self.notification_service.clone()
    }
}
