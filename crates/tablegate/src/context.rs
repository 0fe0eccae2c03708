//! Execution budget: how much wall-clock time the invocation has left.
//!
//! The delete orchestrator checks this between batches and stops with a
//! resumable partial response when the floor is crossed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Remaining-execution-time query, abstracted from the invocation context.
pub trait ExecutionBudget: Send + Sync {
    /// Milliseconds left before the platform kills the invocation.
    fn remaining_millis(&self) -> u64;
}

/// Budget derived from an absolute deadline in epoch milliseconds, the form
/// the Lambda context hands over.
#[derive(Debug, Clone, Copy)]
pub struct EpochDeadline {
    deadline_ms: u64,
}

impl EpochDeadline {
    pub fn new(deadline_ms: u64) -> Self {
        Self { deadline_ms }
    }
}

impl ExecutionBudget for EpochDeadline {
    fn remaining_millis(&self) -> u64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.deadline_ms.saturating_sub(now_ms)
    }
}

/// A budget that never runs out, for paths that don't check time.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlimitedBudget;

impl ExecutionBudget for UnlimitedBudget {
    fn remaining_millis(&self) -> u64 {
        u64::MAX
    }
}

/// A budget that counts down a fixed amount per query, for testing
/// time-bounded loops deterministically.
#[derive(Debug)]
pub struct CountdownBudget {
    remaining: AtomicU64,
    step: u64,
}

impl CountdownBudget {
    /// Starts at `initial_millis` and loses `step_millis` every time it is
    /// queried.
    pub fn new(initial_millis: u64, step_millis: u64) -> Self {
        Self {
            remaining: AtomicU64::new(initial_millis),
            step: step_millis,
        }
    }
}

impl ExecutionBudget for CountdownBudget {
    fn remaining_millis(&self) -> u64 {
        let before = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_sub(self.step))
            })
            .unwrap_or(0);
        before
    }
}
