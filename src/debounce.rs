//! Input debouncing
//!
//! The debouncer owns its only pending timer, so dropping it (or feeding it a
//! new value) is the cancellation. Event loops ask [`Debouncer::deadline`] how
//! long they may sleep and call [`Debouncer::poll`] when they wake up.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Emits a value once it has been stable for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<Pending<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// `initial` counts as already settled.
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// Record a new input value, replacing any pending one.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Returns the value if it became stable at or before `now` and differs
    /// from the last emitted one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now => {}
            _ => return None,
        }
        let pending = self.pending.take()?;
        if pending.value == self.settled {
            return None;
        }
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    /// When the pending value is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Settle the pending value now, without waiting for its deadline.
    pub fn flush(&mut self) -> Option<T> {
        let pending = self.pending.take()?;
        self.settled = pending.value.clone();
        Some(pending.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Last emitted value
    pub fn settled(&self) -> &T {
        &self.settled
    }
}
