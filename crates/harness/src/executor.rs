//! Statement execution against a named node.
//!
//! A thin layer over the registry: resolve the session, run the
//! statement, hand the rows back. Deliberately no retry here - retries
//! belong to the poller, which re-executes against a predicate with a
//! bounded window.

use clustervet_core::{NodeId, QueryResult, Result, Role, Statement};
use tracing::trace;

use crate::registry::NodeRegistry;

/// Executes statements through the session registry.
pub struct Executor {
    registry: NodeRegistry,
}

impl Executor {
    /// Wrap a registry.
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// Execute `statement` on `node` under `role` and return all rows.
    pub fn execute(
        &mut self,
        node: &NodeId,
        role: Role,
        statement: &Statement,
    ) -> Result<QueryResult> {
        trace!(node = %node, role = %role, statement = %statement, "executing");
        let session = self.registry.session(node, role)?;
        session.execute(statement)
    }

    /// Release every cached session.
    pub fn close_all(&mut self) {
        self.registry.close_all();
    }

    /// Number of currently cached sessions.
    pub fn open_sessions(&self) -> usize {
        self.registry.open_sessions()
    }
}
