//! LogiFretes mock shipping-quote HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/cotacoes` - Quote a shipment (other methods: 405, empty body)
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Request Lifecycle
//!
//! `Received → Authenticated? → Parsed? → Validated? → {Failed(503) | Succeeded(200)}`
//!
//! Any negative step ends the request with exactly one error envelope.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use logifretes_service_shared::{
    authorize, format_processing_time, health_live, health_ready, metrics_handler,
    record_quote_failed, record_quotes_served, record_simulated_latency, select_quotes, AppState,
    ErrorResponse, MetricsLayer, PayloadError, Quote, QuoteError, QuoteRequest, RequestId,
    SuccessResponse, Validate,
};

/// Path of the quote endpoint.
pub const QUOTE_PATH: &str = "/api/cotacoes";

/// Largest request body accepted before answering `INVALID_JSON`.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the service router around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_PATH, post(quote_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Quotes produced by a request that made it through every step.
#[derive(Debug)]
struct Quotation {
    quotes: Vec<Quote>,
    processing_time: Duration,
}

/// Handle `POST /api/cotacoes`.
///
/// The request id comes from [`MetricsLayer`]; when the router is used
/// without it a fresh one is generated here.
pub async fn quote_handler(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let request_id = parts
        .extensions
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(RequestId::generate);

    match process_quote(&state, &parts.headers, body).await {
        Ok(quotation) => {
            record_quotes_served(&quotation.quotes);
            info!(
                request_id = %request_id,
                quotes = quotation.quotes.len(),
                processing_time = %format_processing_time(quotation.processing_time),
                "quote served"
            );
            SuccessResponse::new(request_id, quotation.quotes, quotation.processing_time)
                .into_response()
        }
        Err(error) => {
            let code = error.code();
            record_quote_failed(code);
            warn!(
                request_id = %request_id,
                error_code = %code,
                error = %error,
                "quote request rejected"
            );
            ErrorResponse::from_error(error, request_id).into_response()
        }
    }
}

async fn process_quote(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<Quotation, QuoteError> {
    authorize(headers, state.token_prefix())?;

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(PayloadError::from)?;
    let request = QuoteRequest::from_json_slice(&bytes)?;
    request.validate()?;

    let processing_time = state.chaos().processing_time();
    state.delay().wait(processing_time).await;
    record_simulated_latency(processing_time);

    if state.chaos().should_fail() {
        return Err(QuoteError::ServiceUnavailable);
    }

    Ok(Quotation {
        quotes: select_quotes(&request.services),
        processing_time,
    })
}
