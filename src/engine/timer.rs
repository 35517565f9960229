//! One-shot deferred task queue
//!
//! Implements the host scheduler capability on top of simulated time. Tasks
//! are armed with a delay, cannot be cancelled, and come back out of
//! `advance` in deadline order once the clock reaches them.

use crate::game::host::Scheduler;

/// Slack applied when comparing deadlines so that summed `f32` frame deltas
/// still land on the tick where the delay nominally elapses
const FIRE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct PendingTask<T> {
    task: T,
    deadline: f64,
    sequence: u64,
}

/// Queue of armed tasks keyed by absolute deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    /// Simulated time in seconds
    now: f64,
    /// Arming order, used to break deadline ties
    next_sequence: u64,
    pending: Vec<PendingTask<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_sequence: 0,
            pending: Vec::new(),
        }
    }

    /// Current simulated time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of armed tasks that have not fired yet
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock by `dt` seconds and return every task that is now due
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += f64::from(dt.max(0.0));
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.deadline - now <= FIRE_EPSILON);
        self.pending = waiting;

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|pending| pending.task).collect()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, task: T, delay: f32) {
        let deadline = self.now + f64::from(delay.max(0.0));
        self.pending.push(PendingTask {
            task,
            deadline,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }
}
