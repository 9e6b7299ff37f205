//! Session registry.
//!
//! Owns every session the harness opens. Sessions are established lazily
//! on first use and cached per `(node, role)` key, so a check suite
//! reuses connections instead of reopening them per check. `close_all`
//! releases everything best-effort and also runs on drop, so sessions are
//! returned even when a check body bails out early.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use clustervet_core::{Connector, Error, NodeConfig, NodeId, Result, Role, Session};
use tracing::{debug, warn};

/// Maps `(node, role)` to a cached live session.
pub struct NodeRegistry {
    connector: Box<dyn Connector>,
    nodes: Vec<NodeConfig>,
    sessions: HashMap<(NodeId, Role), Box<dyn Session>>,
}

impl NodeRegistry {
    /// Create a registry over the given connector and topology.
    ///
    /// No connections are opened yet.
    pub fn new(connector: Box<dyn Connector>, nodes: Vec<NodeConfig>) -> Self {
        Self {
            connector,
            nodes,
            sessions: HashMap::new(),
        }
    }

    /// Get the cached session for `(node, role)`, opening it on first use.
    pub fn session(&mut self, node: &NodeId, role: Role) -> Result<&mut dyn Session> {
        match self.sessions.entry((node.clone(), role)) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_mut()),
            Entry::Vacant(entry) => {
                let config = self
                    .nodes
                    .iter()
                    .find(|n| &n.id == node)
                    .ok_or_else(|| Error::config(format!("unknown node: {node}")))?;
                let session = self.connector.connect(config, role)?;
                debug!(node = %node, role = %role, address = %config.address, "session established");
                Ok(entry.insert(session).as_mut())
            }
        }
    }

    /// Number of currently cached sessions.
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Release every cached session and clear the cache.
    ///
    /// Individual close failures are logged and ignored.
    pub fn close_all(&mut self) {
        for ((node, role), mut session) in self.sessions.drain() {
            if let Err(err) = session.close() {
                warn!(node = %node, role = %role, error = %err, "failed to close session");
            }
        }
    }
}

impl Drop for NodeRegistry {
    fn drop(&mut self) {
        self.close_all();
    }
}
