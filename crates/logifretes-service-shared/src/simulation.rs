//! Simulated carrier latency and failure injection.
//!
//! The handler never touches a random generator or a clock directly. It asks
//! an injected [`ChaosSource`] for the processing time and the failure roll,
//! and an injected [`Delay`] to wait. Production wiring uses
//! [`ThreadRngChaos`] and [`TokioDelay`]; tests plug in [`SeededChaos`],
//! [`FixedChaos`] and [`NoDelay`].

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lower bound of the simulated processing time.
pub const MIN_PROCESSING_TIME: Duration = Duration::from_millis(500);

/// Upper bound of the simulated processing time.
pub const MAX_PROCESSING_TIME: Duration = Duration::from_millis(2000);

/// Probability that an otherwise valid request is answered with 503.
pub const FAILURE_RATE: f64 = 0.30;

/// Source of the per-request random decisions.
///
/// Implementations are shared across concurrent requests.
pub trait ChaosSource: Send + Sync + fmt::Debug {
    /// Draw the processing time for one request.
    fn processing_time(&self) -> Duration;

    /// Roll the injected failure for one request.
    fn should_fail(&self) -> bool;

    /// Short name reported by the readiness probe.
    fn name(&self) -> &'static str;
}

/// Strategy used to wait out the simulated processing time.
#[async_trait]
pub trait Delay: Send + Sync + fmt::Debug {
    async fn wait(&self, duration: Duration);
}

fn sample_processing_time<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    rng.random_range(MIN_PROCESSING_TIME..=MAX_PROCESSING_TIME)
}

fn sample_failure<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(FAILURE_RATE)
}

/// Production source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngChaos;

impl ChaosSource for ThreadRngChaos {
    fn processing_time(&self) -> Duration {
        sample_processing_time(&mut rand::rng())
    }

    fn should_fail(&self) -> bool {
        sample_failure(&mut rand::rng())
    }

    fn name(&self) -> &'static str {
        "thread-rng"
    }
}

/// Reproducible source for tests and load experiments.
#[derive(Debug)]
pub struct SeededChaos {
    rng: Mutex<StdRng>,
}

impl SeededChaos {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        draw(&mut *rng)
    }
}

impl ChaosSource for SeededChaos {
    fn processing_time(&self) -> Duration {
        self.with_rng(|rng| sample_processing_time(rng))
    }

    fn should_fail(&self) -> bool {
        self.with_rng(|rng| sample_failure(rng))
    }

    fn name(&self) -> &'static str {
        "seeded"
    }
}

/// Source that always returns the same outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChaos {
    pub processing_time: Duration,
    pub fail: bool,
}

impl FixedChaos {
    /// Always succeed after `processing_time`.
    pub fn succeed_after(processing_time: Duration) -> Self {
        Self {
            processing_time,
            fail: false,
        }
    }

    /// Always fail after `processing_time`.
    pub fn fail_after(processing_time: Duration) -> Self {
        Self {
            processing_time,
            fail: true,
        }
    }
}

impl ChaosSource for FixedChaos {
    fn processing_time(&self) -> Duration {
        self.processing_time
    }

    fn should_fail(&self) -> bool {
        self.fail
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Sleeps on the tokio timer without blocking the worker thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<D: Delay + ?Sized> Delay for Arc<D> {
    async fn wait(&self, duration: Duration) {
        (**self).wait(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_processing_time_within_bounds() {
        let chaos = SeededChaos::new(7);
        for _ in 0..10_000 {
            let d = chaos.processing_time();
            assert!(d >= MIN_PROCESSING_TIME && d <= MAX_PROCESSING_TIME, "{d:?}");
        }
    }

    #[test]
    fn test_processing_time_spreads_across_range() {
        let chaos = SeededChaos::new(11);
        let samples: Vec<Duration> = (0..10_000).map(|_| chaos.processing_time()).collect();
        let min = samples.iter().min().unwrap();
        let max = samples.iter().max().unwrap();

        assert!(*min < Duration::from_millis(550));
        assert!(*max > Duration::from_millis(1950));
    }

    #[test]
    fn test_failure_rate_converges() {
        let chaos = SeededChaos::new(42);
        let trials = 20_000;
        let failures = (0..trials).filter(|_| chaos.should_fail()).count();
        let rate = failures as f64 / trials as f64;

        assert!((rate - FAILURE_RATE).abs() < 0.02, "observed rate {rate}");
    }

    #[test]
    fn test_seeded_chaos_is_reproducible() {
        let a = SeededChaos::new(99);
        let b = SeededChaos::new(99);
        for _ in 0..100 {
            assert_eq!(a.processing_time(), b.processing_time());
            assert_eq!(a.should_fail(), b.should_fail());
        }
    }

    #[test]
    fn test_thread_rng_chaos_within_bounds() {
        let chaos = ThreadRngChaos;
        for _ in 0..1_000 {
            let d = chaos.processing_time();
            assert!(d >= MIN_PROCESSING_TIME && d <= MAX_PROCESSING_TIME);
        }
    }

    #[test]
    fn test_fixed_chaos() {
        let ok = FixedChaos::succeed_after(Duration::from_millis(750));
        assert_eq!(ok.processing_time(), Duration::from_millis(750));
        assert!(!ok.should_fail());

        let down = FixedChaos::fail_after(Duration::ZERO);
        assert!(down.should_fail());
    }

    #[tokio::test]
    async fn test_no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.wait(Duration::from_secs(60)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_tokio_delay_waits() {
        let start = Instant::now();
        TokioDelay.wait(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_tokio_delay_does_not_serialize_requests() {
        let start = Instant::now();
        let waits = (0..8).map(|_| {
            tokio::spawn(async move { TokioDelay.wait(Duration::from_millis(100)).await })
        });
        for handle in waits.collect::<Vec<_>>() {
            handle.await.unwrap();
        }
        assert!(start.elapsed() < Duration::from_millis(700));
    }
}
