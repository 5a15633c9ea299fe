#[cfg(test)]
mod tests {
    use crate::service::{MailgunError, MailgunNotificationService};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use schedule_common::services::NotificationService;
    use schedule_common::ScheduleError;
    use schedule_config::MailgunConfig;
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    fn config(base_url: &str) -> MailgunConfig {
        MailgunConfig {
            api_key: "key-test".to_string(),
            domain: "sandbox.example.org".to_string(),
            from: "mailgun@sandbox.example.org".to_string(),
            to: "owner@example.org".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    // Spawns a local stand-in for the Mailgun API and returns its base URL
    async fn spawn_fake_mailgun(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_send_email_posts_form_with_basic_auth() {
        let router = Router::new().route(
            "/sandbox.example.org/messages",
            post(
                |headers: HeaderMap, Form(form): Form<HashMap<String, String>>| async move {
                    let expected = format!("Basic {}", STANDARD.encode("api:key-test"));
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    if auth != expected {
                        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Forbidden"})));
                    }
                    assert_eq!(form["from"], "mailgun@sandbox.example.org");
                    assert_eq!(form["to"], "owner@example.org");
                    assert_eq!(form["subject"], "New Meeting Request");
                    assert_eq!(form["text"], "Name: Ada\nEmail: ada@example.com");
                    (
                        StatusCode::OK,
                        Json(json!({"id": "<20250602.1@sandbox.example.org>", "message": "Queued. Thank you."})),
                    )
                },
            ),
        );
        let base_url = spawn_fake_mailgun(router).await;

        let service = MailgunNotificationService::new(config(&base_url)).unwrap();
        let result = service
            .send_email(
                "owner@example.org",
                "New Meeting Request",
                "Name: Ada\nEmail: ada@example.com",
            )
            .await
            .unwrap();

        assert_eq!(result.id, "<20250602.1@sandbox.example.org>");
        assert_eq!(result.status, "Queued. Thank you.");
    }

    #[tokio::test]
    async fn test_api_error_status_is_reported() {
        let router = Router::new().route(
            "/sandbox.example.org/messages",
            post(|| async { (StatusCode::BAD_REQUEST, "'to' parameter is not a valid address") }),
        );
        let base_url = spawn_fake_mailgun(router).await;

        let service = MailgunNotificationService::new(config(&base_url)).unwrap();
        let err = service
            .send_email("nobody", "New Meeting Request", "body")
            .await
            .unwrap_err();

        match err {
            MailgunError::ApiError {
                status_code,
                message,
            } => {
                assert_eq!(status_code, 400);
                assert!(message.contains("not a valid address"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let mut cfg = config("http://localhost");
        cfg.api_key = schedule_config::SECRET_MARKER.to_string();

        let err = MailgunNotificationService::new(cfg).err().unwrap();
        assert!(matches!(err, MailgunError::ConfigError(_)));
        assert!(matches!(
            ScheduleError::from(err),
            ScheduleError::ConfigError(_)
        ));
    }
}
