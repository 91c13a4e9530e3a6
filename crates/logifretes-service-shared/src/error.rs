//! Error envelope returned by the quote endpoint.
//!
//! Every failure is rendered as
//!
//! ```json
//! {"status":"error","error_code":"VALIDATION_ERROR","message":"...","details":[...],"request_id":"..."}
//! ```
//!
//! `details` is only present for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::PayloadError;
use crate::response::ResponseStatus;

/// Machine-readable error codes exposed in the `error_code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Authorization header missing or not a bearer token.
    Unauthorized,
    /// Bearer token without the expected prefix.
    InvalidToken,
    /// Body is not a JSON object of the quote request shape.
    InvalidJson,
    /// One or more field-level violations.
    ValidationError,
    /// Injected carrier outage.
    ServiceUnavailable,
}

impl ErrorCode {
    /// HTTP status this code is reported with.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::Unauthorized | ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::InvalidJson | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Localized message shown to API clients.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "Token de autenticação não fornecido",
            ErrorCode::InvalidToken => "Token de autenticação inválido",
            ErrorCode::InvalidJson => "Formato de JSON inválido",
            ErrorCode::ValidationError => "Erro de validação nos dados informados",
            ErrorCode::ServiceUnavailable => {
                "Serviço temporariamente indisponível. Tente novamente mais tarde."
            }
        }
    }

    /// Wire representation, also used as a metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path mirroring the payload shape, e.g. `pacote.dimensoes.altura`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Terminal failure of a quote request.
///
/// Each variant maps to exactly one [`ErrorCode`]. The request id is attached
/// when the error is rendered, see [`ErrorResponse::from_error`].
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("authorization header missing or not a bearer token")]
    MissingCredentials,

    #[error("bearer token does not carry the expected prefix")]
    InvalidToken,

    #[error("request body is not a valid quote payload: {0}")]
    InvalidJson(#[from] PayloadError),

    #[error("request failed validation with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error("simulated carrier outage")]
    ServiceUnavailable,
}

impl QuoteError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::MissingCredentials => ErrorCode::Unauthorized,
            QuoteError::InvalidToken => ErrorCode::InvalidToken,
            QuoteError::InvalidJson(_) => ErrorCode::InvalidJson,
            QuoteError::Validation(_) => ErrorCode::ValidationError,
            QuoteError::ServiceUnavailable => ErrorCode::ServiceUnavailable,
        }
    }
}

/// Error body returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always [`ResponseStatus::Error`].
    pub status: ResponseStatus,

    pub error_code: ErrorCode,

    pub message: String,

    /// Field-level issues, only present for `VALIDATION_ERROR`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationIssue>,

    pub request_id: String,
}

impl ErrorResponse {
    /// Create an error body for `code` with its default message.
    pub fn new(code: ErrorCode, request_id: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error_code: code,
            message: code.message().to_string(),
            details: Vec::new(),
            request_id: request_id.into(),
        }
    }

    /// Attach validation issues.
    pub fn with_details(mut self, details: Vec<ValidationIssue>) -> Self {
        self.details = details;
        self
    }

    /// Render a [`QuoteError`] for the given request.
    pub fn from_error(error: QuoteError, request_id: impl Into<String>) -> Self {
        let code = error.code();
        let response = Self::new(code, request_id);
        match error {
            QuoteError::Validation(issues) => response.with_details(issues),
            _ => response,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.error_code.status()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::InvalidJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::ServiceUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_error_code_serialization_matches_as_str() {
        for code in [
            ErrorCode::Unauthorized,
            ErrorCode::InvalidToken,
            ErrorCode::InvalidJson,
            ErrorCode::ValidationError,
            ErrorCode::ServiceUnavailable,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let response = ErrorResponse::new(ErrorCode::InvalidToken, "req-1");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("\"error_code\":\"INVALID_TOKEN\""));
        assert!(json.contains("\"request_id\":\"req-1\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_from_validation_error_keeps_issues() {
        let issues = vec![
            ValidationIssue::new("origem.cep", "CEP de origem é obrigatório"),
            ValidationIssue::new("pacote.peso", "Peso deve ser maior que zero"),
        ];
        let response = ErrorResponse::from_error(QuoteError::Validation(issues.clone()), "req-2");

        assert_eq!(response.error_code, ErrorCode::ValidationError);
        assert_eq!(response.details, issues);
        assert_eq!(response.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = ErrorResponse::new(ErrorCode::ServiceUnavailable, "req-3").into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
