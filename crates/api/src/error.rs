//! Translation of application errors into HTTP responses.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use bolso_shared::AppError;

/// Renders an [`AppError`] as a JSON error response.
///
/// Uses the error's canonical status code and error code, so every route
/// surfaces failures the same way.
#[must_use]
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    // Never leak internals: 5xx bodies carry a generic message.
    let message = if status.is_server_error() {
        "An error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message,
        })),
    )
        .into_response()
}

/// Shorthand for an internal error response.
#[must_use]
pub fn internal_error() -> Response {
    error_response(&AppError::Internal("internal error".to_string()))
}

/// Shorthand for a validation error response.
#[must_use]
pub fn validation_error(message: impl Into<String>) -> Response {
    error_response(&AppError::Validation(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_keeps_message() {
        let response = error_response(&AppError::Conflict("duplicate".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_server_error_masks_message() {
        let response = error_response(&AppError::Database("secret detail".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let response = error_response(&AppError::NotFound("envelope".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
