//! The injected entailment capability and caller-side wrappers.
//!
//! The scorer never loads models, opens connections or retries. Whatever
//! reaches it is a single `entails(premise, hypothesis)` call; [`Retry`] and
//! [`ConcurrencyLimit`] wrap a capability before it is injected and are
//! invisible to the scorer.

use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Why an entailment call produced no probability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntailmentFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// Probability that `premise` logically entails `hypothesis`.
///
/// Implementations may be slow and may fail; they must tolerate concurrent
/// calls when a pipeline scores windows in parallel (see
/// [`ConcurrencyLimit`] otherwise).
pub trait Entailment: Send + Sync {
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure>;
}

impl<F> Entailment for F
where
    F: Fn(&str, &str) -> Result<f64, EntailmentFailure> + Send + Sync,
{
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure> {
        self(premise, hypothesis)
    }
}

/// Retries failed calls with a linearly growing pause.
#[derive(Debug, Clone)]
pub struct Retry<E> {
    inner: E,
    max_attempts: usize,
    backoff: Duration,
}

impl<E: Entailment> Retry<E> {
    /// `max_attempts` counts the first call; values below 1 are raised to 1.
    pub fn new(inner: E, max_attempts: usize, backoff: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

impl<E: Entailment> Entailment for Retry<E> {
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure> {
        let mut attempt = 1;
        loop {
            match self.inner.entails(premise, hypothesis) {
                Ok(probability) => return Ok(probability),
                Err(failure) if attempt >= self.max_attempts => return Err(failure),
                Err(failure) => {
                    log::warn!(
                        "entailment attempt {}/{} failed: {}",
                        attempt,
                        self.max_attempts,
                        failure
                    );
                    thread::sleep(self.backoff * attempt as u32);
                    attempt += 1;
                }
            }
        }
    }
}

/// Bounds the number of calls in flight at once.
#[derive(Debug)]
pub struct ConcurrencyLimit<E> {
    inner: E,
    max_in_flight: usize,
    in_flight: Mutex<usize>,
    released: Condvar,
}

impl<E: Entailment> ConcurrencyLimit<E> {
    /// `max_in_flight` below 1 is raised to 1.
    pub fn new(inner: E, max_in_flight: usize) -> Self {
        Self {
            inner,
            max_in_flight: max_in_flight.max(1),
            in_flight: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    fn acquire(&self) -> Permit<'_, E> {
        let mut count = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        while *count >= self.max_in_flight {
            count = self
                .released
                .wait(count)
                .unwrap_or_else(|e| e.into_inner());
        }
        *count += 1;
        Permit { limit: self }
    }
}

/// Returns its slot on drop, including when the inner call panics.
struct Permit<'a, E> {
    limit: &'a ConcurrencyLimit<E>,
}

impl<'a, E> Drop for Permit<'a, E> {
    fn drop(&mut self) {
        let mut count = self
            .limit
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *count -= 1;
        self.limit.released.notify_one();
    }
}

impl<E: Entailment> Entailment for ConcurrencyLimit<E> {
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<f64, EntailmentFailure> {
        let _permit = self.acquire();
        self.inner.entails(premise, hypothesis)
    }
}
