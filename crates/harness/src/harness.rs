//! The harness instance checks run against.
//!
//! Bundles the executor, the clock, and the resolved cluster topology.
//! Also hosts the scratch-table scope used by write-based checks: the
//! table is dropped after the body runs, whether or not the body
//! succeeded, and a failing drop is logged rather than escalated so it
//! never masks the original failure.

use clustervet_core::{
    ClusterConfig, Connector, NodeId, QueryResult, Result, Role, Statement,
};
use tracing::warn;

use crate::executor::Executor;
use crate::poll::{poll_until, Clock, PollConfig, SystemClock};
use crate::registry::NodeRegistry;

/// Everything a check needs: query execution, polling, and the expected
/// cluster shape.
pub struct Harness {
    executor: Executor,
    clock: Box<dyn Clock>,
    config: ClusterConfig,
}

impl Harness {
    /// Build a harness over a connector, using the system clock.
    ///
    /// Validates the topology; no connections are opened yet.
    pub fn new(config: ClusterConfig, connector: Box<dyn Connector>) -> Result<Self> {
        Self::with_clock(config, connector, Box::new(SystemClock))
    }

    /// Build a harness with an explicit clock (tests use a manual one).
    pub fn with_clock(
        config: ClusterConfig,
        connector: Box<dyn Connector>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let registry = NodeRegistry::new(connector, config.nodes.clone());
        Ok(Self {
            executor: Executor::new(registry),
            clock,
            config,
        })
    }

    /// The cluster as configured.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Execute one statement on `node` under `role`.
    pub fn execute(
        &mut self,
        node: &NodeId,
        role: Role,
        statement: &Statement,
    ) -> Result<QueryResult> {
        self.executor.execute(node, role, statement)
    }

    /// Poll `node` until `predicate` accepts a result or `config` times out.
    pub fn poll_until<P>(
        &mut self,
        node: &NodeId,
        role: Role,
        statement: &Statement,
        config: PollConfig,
        predicate: P,
    ) -> Result<QueryResult>
    where
        P: FnMut(&QueryResult) -> bool,
    {
        poll_until(
            &mut self.executor,
            self.clock.as_ref(),
            node,
            role,
            statement,
            config,
            predicate,
        )
    }

    /// Run `body` inside a scratch-table scope on `node`.
    ///
    /// Creates the table first, then always attempts the drop afterwards,
    /// even when `body` failed. A drop failure is logged and swallowed;
    /// the body's own result wins.
    pub fn with_scratch_table<F, T>(
        &mut self,
        node: &NodeId,
        role: Role,
        create: &Statement,
        drop: &Statement,
        body: F,
    ) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.execute(node, role, create)?;
        let result = body(self);
        if let Err(err) = self.execute(node, role, drop) {
            warn!(node = %node, error = %err, "scratch table cleanup failed");
        }
        result
    }

    /// Release every cached session. Also happens on drop.
    pub fn close(&mut self) {
        self.executor.close_all();
    }

    /// Number of currently cached sessions.
    pub fn open_sessions(&self) -> usize {
        self.executor.open_sessions()
    }
}
