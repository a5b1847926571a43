// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::access::{CallerError, ScopeParseError};
use crate::database::DatabaseError;
use crate::export::{ExportTooLarge, UnsupportedFormat};
use crate::services::ScopeError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error; upstream messages are passed through
    Upstream(String),
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Upstream(_) => 500,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Upstream(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });

        if let ApiError::ValidationError {
            field_errors: Some(field_errors),
            ..
        } = self
        {
            response["field_errors"] = json!(field_errors);
        }

        response
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Status as an axum `StatusCode`
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unavailable() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        tracing::error!("Upstream query failed: {}", err);
        ApiError::upstream(err.to_string())
    }
}

impl From<ScopeParseError> for ApiError {
    fn from(err: ScopeParseError) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(err.field().to_string(), err.to_string());
        ApiError::validation_error(err.to_string(), Some(field_errors))
    }
}

impl From<CallerError> for ApiError {
    fn from(err: CallerError) -> Self {
        tracing::warn!("Rejected caller profile: {}", err);
        ApiError::forbidden(err.to_string())
    }
}

impl From<ScopeError> for ApiError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Denied(reason) => ApiError::forbidden(reason.message()),
            ScopeError::Lookup(e) => e.into(),
        }
    }
}

impl From<UnsupportedFormat> for ApiError {
    fn from(err: UnsupportedFormat) -> Self {
        tracing::debug!("Export requested in unsupported format '{}'", err.0);
        ApiError::bad_request(err.to_string())
    }
}

impl From<ExportTooLarge> for ApiError {
    fn from(err: ExportTooLarge) -> Self {
        tracing::warn!("Export refused: {}", err);
        ApiError::bad_request(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        tracing::error!("CSV rendering failed: {}", err);
        ApiError::internal_server_error("Failed to render export")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::DenyReason;

    #[test]
    fn body_has_error_envelope() {
        let err = ApiError::forbidden("Forbidden");
        assert_eq!(err.status_code(), 403);
        assert_eq!(
            err.to_json(),
            json!({"error": true, "message": "Forbidden", "code": "FORBIDDEN"})
        );
    }

    #[test]
    fn scope_parse_error_is_validation_with_field() {
        let err: ApiError = ScopeParseError::MissingScope.into();
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["message"], "Missing scope parameter");
        assert_eq!(body["field_errors"]["scope"], "Missing scope parameter");
    }

    #[test]
    fn denial_maps_to_forbidden_and_lookup_to_database_mapping() {
        let denied: ApiError = ScopeError::Denied(DenyReason::StateScopeReserved).into();
        assert_eq!(denied.status_code(), 403);

        let unavailable: ApiError = ScopeError::Lookup(DatabaseError::ConfigMissing("DATABASE_URL")).into();
        assert_eq!(unavailable.status_code(), 503);

        let upstream: ApiError = DatabaseError::Sqlx(sqlx::Error::Protocol("boom".into())).into();
        assert_eq!(upstream.status_code(), 500);
        assert!(upstream.message().contains("boom"));
    }

    #[test]
    fn unsupported_format_is_bad_request() {
        let err: ApiError = UnsupportedFormat("pdf".into()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Unsupported format");
    }

    #[test]
    fn oversized_export_is_bad_request_naming_the_limit() {
        let err: ApiError = ExportTooLarge { limit: 50_000 }.into();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("50000"));
    }
}
