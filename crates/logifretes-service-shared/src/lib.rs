//! Shared infrastructure for the LogiFretes mock quote service.
//!
//! This crate provides everything the quote service needs besides the axum
//! router itself:
//!
//! - [`QuoteRequest`]: Wire payload with lenient decoding and field validation
//! - [`authorize`]: Bearer-token prefix check
//! - [`ServiceLevel`] / [`select_quotes`]: Static three-entry quote catalog
//! - [`ChaosSource`] / [`Delay`]: Injected latency and failure simulation
//! - [`ErrorResponse`] / [`QuoteError`]: Structured error envelope
//! - [`AppState`]: Shared handler state holding the injected capabilities
//! - [`health_live`] / [`health_ready`]: Liveness/readiness handlers
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request id and HTTP metrics middleware
//!
//! # Request Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  POST /api/cotacoes                                         │
//! │  - Check bearer token prefix          (401)                 │
//! │  - Decode JSON object                 (400 INVALID_JSON)    │
//! │  - Validate CEPs and package geometry (400 VALIDATION_ERROR)│
//! │  - Wait simulated carrier latency                           │
//! │  - Roll injected failure              (503)                 │
//! │  - Select catalog quotes              (200)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides deterministic state and payload
//! fixtures. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod auth;
mod catalog;
pub mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
pub mod simulation;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use auth::{authorize, EXPECTED_TOKEN_PREFIX};
pub use catalog::{select_quotes, Quote, ServiceLevel, ALL_SERVICES_SENTINEL, CATALOG};
pub use config::ServiceConfig;
pub use error::{ErrorCode, ErrorResponse, QuoteError, ValidationIssue};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_quote_failed, record_quotes_served,
    record_simulated_latency, MetricsConfig, MetricsError,
};
pub use middleware::{MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use request::{Dimensions, Location, Package, PayloadError, QuoteRequest, Validate};
pub use response::{format_processing_time, ResponseMeta, ResponseStatus, SuccessResponse};
pub use simulation::{
    ChaosSource, Delay, FixedChaos, NoDelay, SeededChaos, ThreadRngChaos, TokioDelay,
};
pub use state::AppState;
