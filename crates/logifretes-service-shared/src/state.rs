//! Application state for the quote service.
//!
//! Holds the injected capabilities the handler needs. There is no
//! per-request or cross-request mutable data in here.

use std::sync::Arc;

use crate::auth::EXPECTED_TOKEN_PREFIX;
use crate::simulation::{ChaosSource, Delay, ThreadRngChaos, TokioDelay};

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use logifretes_service_shared::{AppState, FixedChaos, NoDelay};
///
/// // Production wiring: thread-local randomness, real sleeps.
/// let state = AppState::new();
///
/// // Deterministic wiring: always succeed, never sleep.
/// let state = AppState::from_components(
///     FixedChaos::succeed_after(Duration::from_millis(800)),
///     NoDelay,
/// );
/// assert_eq!(state.chaos().name(), "fixed");
/// ```
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    token_prefix: Arc<str>,
}

#[derive(Debug)]
struct AppStateInner {
    chaos: Box<dyn ChaosSource>,
    delay: Box<dyn Delay>,
}

impl AppState {
    /// Production state: [`ThreadRngChaos`], [`TokioDelay`] and the
    /// standard token prefix.
    pub fn new() -> Self {
        Self::from_components(ThreadRngChaos, TokioDelay)
    }

    /// Create application state from explicit capabilities.
    pub fn from_components(
        chaos: impl ChaosSource + 'static,
        delay: impl Delay + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                chaos: Box::new(chaos),
                delay: Box::new(delay),
            }),
            token_prefix: Arc::from(EXPECTED_TOKEN_PREFIX),
        }
    }

    /// Replace the accepted token prefix.
    pub fn with_token_prefix(mut self, token_prefix: impl Into<Arc<str>>) -> Self {
        self.token_prefix = token_prefix.into();
        self
    }

    pub fn chaos(&self) -> &dyn ChaosSource {
        self.inner.chaos.as_ref()
    }

    pub fn delay(&self) -> &dyn Delay {
        self.inner.delay.as_ref()
    }

    pub fn token_prefix(&self) -> &str {
        &self.token_prefix
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
