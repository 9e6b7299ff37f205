//! The seam to the real database client.
//!
//! The harness treats the database purely as a query-execution
//! capability: something that can open an authenticated session against
//! one node under one role, and run statements on it. Wire protocol
//! details stay behind these traits, which is what lets the whole check
//! suite run against an in-memory fake cluster in tests.

use crate::config::{NodeConfig, Role};
use crate::error::Result;
use crate::row::QueryResult;
use crate::statement::Statement;

/// An open, authenticated connection bound to one `(node, role)` pair.
///
/// Implementations report failures as [`crate::Error::Query`], carrying
/// the node they are bound to.
pub trait Session {
    /// Execute one statement and return all resulting rows.
    fn execute(&mut self, statement: &Statement) -> Result<QueryResult>;

    /// Release the underlying connection. Best-effort; callers ignore
    /// failures. The default is a no-op for clients that disconnect on
    /// drop.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens sessions against cluster nodes.
pub trait Connector {
    /// Open a new authenticated session for `node` under `role`.
    ///
    /// Fails with [`crate::Error::Connection`] if network setup or
    /// authentication fails.
    fn connect(&self, node: &NodeConfig, role: Role) -> Result<Box<dyn Session>>;
}
