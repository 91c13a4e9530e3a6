//! Success envelope returned by the quote endpoint.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::Quote;

/// Value of the `status` field shared by both envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Successful quote response.
///
/// ```
/// use std::time::Duration;
/// use logifretes_service_shared::{select_quotes, SuccessResponse};
///
/// let response = SuccessResponse::new("req-1", select_quotes(&["express"]), Duration::from_millis(1234));
/// assert_eq!(response.meta.processed_in, "1.2340s");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always [`ResponseStatus::Success`].
    pub status: ResponseStatus,

    pub request_id: String,

    /// Selected quotes in catalog order.
    #[serde(rename = "cotacoes")]
    pub quotes: Vec<Quote>,

    pub meta: ResponseMeta,
}

/// Processing metadata attached to successful responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Simulated processing time, e.g. `"1.2345s"`.
    #[serde(rename = "processado_em")]
    pub processed_in: String,
}

impl SuccessResponse {
    pub fn new(request_id: impl Into<String>, quotes: Vec<Quote>, processing_time: Duration) -> Self {
        Self {
            status: ResponseStatus::Success,
            request_id: request_id.into(),
            quotes,
            meta: ResponseMeta {
                processed_in: format_processing_time(processing_time),
            },
        }
    }
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Format a duration as seconds with four decimals and an `s` suffix.
pub fn format_processing_time(duration: Duration) -> String {
    format!("{:.4}s", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::select_quotes;

    #[test]
    fn test_format_processing_time() {
        assert_eq!(format_processing_time(Duration::from_millis(500)), "0.5000s");
        assert_eq!(format_processing_time(Duration::from_micros(1_234_567)), "1.2346s");
        assert_eq!(format_processing_time(Duration::from_secs(2)), "2.0000s");
        assert_eq!(format_processing_time(Duration::ZERO), "0.0000s");
    }

    #[test]
    fn test_success_serialization() {
        let response = SuccessResponse::new(
            "req-9",
            select_quotes(&["standard"]),
            Duration::from_millis(750),
        );
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["request_id"], "req-9");
        assert_eq!(json["cotacoes"][0]["tipo"], "standard");
        assert_eq!(json["cotacoes"][0]["codigo"], "STD");
        assert_eq!(json["meta"]["processado_em"], "0.7500s");
    }

    #[test]
    fn test_empty_quotes_serialize_as_array() {
        let response = SuccessResponse::new("req-10", Vec::new(), Duration::ZERO);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"cotacoes\":[]"));
    }

    #[test]
    fn test_into_response_is_ok() {
        let response = SuccessResponse::new("req-11", Vec::new(), Duration::ZERO).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
