//! Resolved cluster topology.
//!
//! The harness never reads configuration storage itself; a loader (the
//! CLI, or test setup) resolves addresses and credentials into a
//! [`ClusterConfig`] up front, and the harness only consumes it.
//! Everything here is immutable once built.

use crate::error::{Error, Result};

/// Access level used for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Regular application user.
    Standard,
    /// Administrative user, needed to read cluster status variables.
    Privileged,
}

impl Role {
    /// Short label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Privileged => "privileged",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical identifier of one cluster node, e.g. `node1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Username/password pair for one role.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
}

// Keep passwords out of debug output and logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection parameters for one node, for both roles.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Logical node identifier.
    pub id: NodeId,
    /// Network address (host name or IP).
    pub address: String,
    /// TCP port.
    pub port: u16,
    /// Credentials for the standard role.
    pub standard: Credentials,
    /// Credentials for the privileged role.
    pub privileged: Credentials,
    /// Database / keyspace to bind sessions to.
    pub database: String,
}

impl NodeConfig {
    /// The credentials for a given role.
    pub fn credentials(&self, role: Role) -> &Credentials {
        match role {
            Role::Standard => &self.standard,
            Role::Privileged => &self.privileged,
        }
    }
}

/// The whole cluster as the harness expects to find it.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Cluster name the nodes should report.
    pub cluster_name: String,
    /// All member nodes, in check order.
    pub nodes: Vec<NodeConfig>,
}

impl ClusterConfig {
    /// The member count every node should report.
    pub fn expected_size(&self) -> usize {
        self.nodes.len()
    }

    /// Find a node's configuration by id.
    pub fn node(&self, id: &NodeId) -> Option<&NodeConfig> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Validate the topology: at least two nodes, pairwise-distinct ids.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.len() < 2 {
            return Err(Error::config(format!(
                "a cluster harness needs at least two nodes, got {}",
                self.nodes.len()
            )));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|other| other.id == node.id) {
                return Err(Error::config(format!("duplicate node id: {}", node.id)));
            }
        }
        Ok(())
    }
}
