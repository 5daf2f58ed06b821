#![forbid(unsafe_code)]

//! Virtual-time deadline queue.
//!
//! Tasks are scheduled relative to the timeline's current time and popped in
//! deadline order. Ties keep insertion order. Popping a task moves the
//! current time to its deadline, so continuations scheduled from inside a
//! fired task are measured from when it was *due*, not from when the caller
//! got around to running it.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
struct Deadline<T> {
    at: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Deadline<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<T> Eq for Deadline<T> {}

impl<T> PartialOrd for Deadline<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Deadline<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending tasks keyed by due time.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<Deadline<T>>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    /// Empty timeline at time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is scheduled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedule `task` to run `delay` after the current time.
    pub fn schedule(&mut self, task: T, delay: Duration) {
        let at = self.now.saturating_add(delay);
        self.queue.push(Reverse(Deadline {
            at,
            seq: self.seq,
            task,
        }));
        self.seq += 1;
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(d)| d.at)
    }

    /// Pop the earliest task if it is due at or before `until`.
    ///
    /// Moves the current time forward to that task's deadline. Returns the
    /// task together with its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<(T, Duration)> {
        if self.next_deadline()? > until {
            return None;
        }
        let Reverse(deadline) = self.queue.pop()?;
        self.now = self.now.max(deadline.at);
        Some((deadline.task, deadline.at))
    }

    /// Move the current time forward to `t`. Never moves backwards.
    pub fn advance_to(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }
}
