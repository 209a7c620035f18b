//! Uniform error-response body.
//!
//! Every failed request answers with
//! `{"detail": {"error_code": "...", "message": "..."}}` so clients
//! can branch on the stable `error_code` instead of parsing prose.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Builds an error response from a status, code, and message.
///
/// Domain errors carry their own `http_status_code()` and
/// `error_code()`; handlers pass those through unchanged.
pub fn error_response(status: u16, error_code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "detail": {
                "error_code": error_code,
                "message": message,
            }
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(404, "JOURNAL_NOT_FOUND", StatusCode::NOT_FOUND)]
    #[case(409, "CONFLICT", StatusCode::CONFLICT)]
    #[case(422, "UNBALANCED_JOURNAL", StatusCode::UNPROCESSABLE_ENTITY)]
    fn test_error_response_status(
        #[case] status: u16,
        #[case] code: &str,
        #[case] expected: StatusCode,
    ) {
        let response = error_response(status, code, "message");
        assert_eq!(response.status(), expected);
    }

    #[test]
    fn test_bogus_status_falls_back_to_500() {
        let response = error_response(0, "DATABASE_ERROR", "broken");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
