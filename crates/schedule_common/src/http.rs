// --- File: crates/schedule_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, ScheduleError};

/// Extension trait for ScheduleError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for ScheduleError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a `Result<T, ScheduleError>` into a JSON handler result.
pub fn handle_json_result<T>(result: Result<T, ScheduleError>) -> Result<Json<T>, Response>
where
    T: serde::Serialize,
{
    result.map(Json).map_err(|err| err.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::external_service_error;

    #[test]
    fn test_error_maps_to_bad_gateway() {
        let response = external_service_error("google-calendar", "boom").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_handle_json_result_ok() {
        let result: Result<u32, ScheduleError> = Ok(7);
        let Json(value) = handle_json_result(result).unwrap();
        assert_eq!(value, 7);
    }
}
