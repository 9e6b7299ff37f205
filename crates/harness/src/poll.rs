//! Bounded polling for eventually-consistent assertions.
//!
//! A write issued on one node becomes visible on the others only after
//! the cluster converges, so asserting immediately after a write is racy.
//! [`poll_until`] turns that race into a bounded, deterministic wait:
//! re-execute the statement on an interval until a predicate holds, or
//! fail with [`Error::Timeout`] carrying the last observed result.
//!
//! Time is abstracted behind [`Clock`] so the timeout path is testable
//! without real waits.

use std::time::{Duration, Instant};

use clustervet_core::{Error, NodeId, QueryResult, Result, Role, Statement};
use tracing::trace;

use crate::executor::Executor;

/// A source of time and sleep. Production code uses [`SystemClock`];
/// tests inject a manual clock.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Block for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Per-call polling parameters. Different checks tolerate different
/// convergence latencies, so this is not a global constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between attempts.
    pub interval: Duration,
    /// Total window before giving up.
    pub timeout: Duration,
}

impl PollConfig {
    /// Create a poll configuration.
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// Re-execute `statement` on `node` until `predicate` accepts the result.
///
/// Returns the first satisfying [`QueryResult`]. Fails with
/// [`Error::Timeout`] once the window elapses, carrying the last observed
/// result, the elapsed time, and the attempt count. Query failures are
/// not retried; they propagate immediately as [`Error::Query`].
pub fn poll_until<P>(
    executor: &mut Executor,
    clock: &dyn Clock,
    node: &NodeId,
    role: Role,
    statement: &Statement,
    config: PollConfig,
    mut predicate: P,
) -> Result<QueryResult>
where
    P: FnMut(&QueryResult) -> bool,
{
    let started = clock.now();
    let mut attempts: u32 = 0;

    loop {
        let result = executor.execute(node, role, statement)?;
        attempts += 1;
        if predicate(&result) {
            trace!(node = %node, attempts, "poll predicate satisfied");
            return Ok(result);
        }

        let elapsed = clock.now().duration_since(started);
        if elapsed >= config.timeout {
            return Err(Error::Timeout {
                node: node.clone(),
                elapsed,
                attempts,
                last: result,
            });
        }
        clock.sleep(config.interval);
    }
}
