//! Response types for the HRIS API.
//!
//! This module defines the error response structures, the mapping from
//! [`HrisError`] to HTTP statuses, and the small JSON bodies returned by
//! endpoints that have no domain record to return.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::access::Section;
use crate::error::HrisError;
use crate::models::User;
use crate::store::RemoveOutcome;

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Upper-snake-case code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    /// Message suitable for display.
    pub message: String,
    /// The offending field or id, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// An error without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// An error carrying details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// A body that could not be parsed as JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// An internal error whose body carries only the code; the cause is
    /// logged server-side.
    pub fn operation_failed(code: impl Into<String>) -> Self {
        Self::new(code, "operation failed")
    }
}

/// An [`ApiError`] paired with the status it is sent with.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Builds a response from a status and body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// The response for a missing or unknown bearer token.
    pub fn unauthenticated() -> Self {
        HrisError::Unauthenticated.into()
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<HrisError> for ApiErrorResponse {
    fn from(error: HrisError) -> Self {
        let message = error.to_string();
        if matches!(
            error,
            HrisError::ConfigNotFound { .. }
                | HrisError::ConfigParseError { .. }
                | HrisError::Persistence { .. }
                | HrisError::Export { .. }
        ) {
            error!(error = %message, "request failed with an internal error");
        }
        let (status, error) = match error {
            HrisError::ConfigNotFound { .. } | HrisError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::operation_failed("CONFIG_ERROR"),
            ),
            HrisError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            HrisError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", message),
            ),
            HrisError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
            HrisError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "NOT_FOUND",
                    message,
                    format!("No {} has the id '{}'", entity.to_lowercase(), id),
                ),
            ),
            HrisError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, field),
            ),
            HrisError::InvalidStatusTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INVALID_STATUS_TRANSITION", message),
            ),
            HrisError::InsufficientLeaveBalance { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INSUFFICIENT_LEAVE_BALANCE", message),
            ),
            HrisError::NoEmployeeRecord { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("NO_EMPLOYEE_RECORD", message),
            ),
            HrisError::AlreadyCheckedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_CHECKED_IN", message),
            ),
            HrisError::NotCheckedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("NOT_CHECKED_IN", message),
            ),
            HrisError::InvalidPayrollInput { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PAYROLL_INPUT", message),
            ),
            HrisError::Persistence { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::operation_failed("PERSISTENCE_ERROR"),
            ),
            HrisError::UnsupportedFormat { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("UNSUPPORTED_FORMAT", message),
            ),
            HrisError::Export { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::operation_failed("EXPORT_ERROR"),
            ),
        };
        Self { status, error }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

/// A plain message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// The current user and the sections they may open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The authenticated user.
    pub user: User,
    /// Navigable sections for the user's role.
    pub sections: Vec<Section>,
}

/// The outcome of a deduction removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveDeductionResponse {
    /// The deduction id.
    pub id: String,
    /// What happened.
    pub outcome: RemoveOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response: ApiErrorResponse = HrisError::InvalidCredentials.into();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.error.message, "Invalid credentials");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = HrisError::not_found("Employee", "EMP999").into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
        assert_eq!(response.error.message, "Employee not found: EMP999");
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let response: ApiErrorResponse = HrisError::Persistence {
            path: "/data/deductions.json".to_string(),
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "PERSISTENCE_ERROR");
        assert_eq!(response.error.message, "operation failed");
        assert!(response.error.details.is_none());

        let body = serde_json::to_string(&response.error).unwrap();
        assert!(!body.contains("disk full"));
        assert!(!body.contains("/data/deductions.json"));
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response: ApiErrorResponse = HrisError::forbidden("run payroll").into();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}
