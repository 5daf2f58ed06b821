#![forbid(unsafe_code)]

//! Stop signal for the program loop.
//!
//! The loop sleeps until the next deadline with [`StopSignal::wait_timeout`].
//! A [`StopTrigger`] (held by the signal handler thread, or by the embedder)
//! wakes it immediately.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

type Shared = Arc<(Mutex<bool>, Condvar)>;

/// Receiving side: checked and waited on by the loop.
#[derive(Clone, Debug)]
pub struct StopSignal {
    inner: Shared,
}

/// Sending side: sets the signal and wakes every waiter.
#[derive(Clone, Debug)]
pub struct StopTrigger {
    inner: Shared,
}

impl StopSignal {
    /// Create a new (signal, trigger) pair.
    pub fn new() -> (Self, StopTrigger) {
        let inner: Shared = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether the trigger has fired.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until stopped or until `duration` has passed.
    ///
    /// Returns `true` if stopped, `false` on timeout. Spurious wakeups are
    /// absorbed by re-waiting for the remaining time.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

impl StopTrigger {
    /// Fire the signal.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}
