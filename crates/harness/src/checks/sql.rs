//! Statements shared by the checks.
//!
//! Values are always bound parameters. Table names cannot be bound, so
//! every constructor that interpolates one asserts it came through the
//! safe-identifier gate.

use clustervet_core::{is_safe_identifier, QueryResult, Statement};

/// Status value a fully caught-up node reports.
pub(crate) const SYNCED_STATE: &str = "Synced";

/// Status value a node ready for reads and writes reports.
pub(crate) const READY: &str = "ON";

/// The status facts the health and identity checks read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusFact {
    ClusterSize,
    LocalState,
    Ready,
    ClusterName,
    NodeName,
    NodeAddress,
}

impl StatusFact {
    /// The server status variable backing this fact.
    pub(crate) fn variable(self) -> &'static str {
        match self {
            StatusFact::ClusterSize => "wsrep_cluster_size",
            StatusFact::LocalState => "wsrep_local_state_comment",
            StatusFact::Ready => "wsrep_ready",
            StatusFact::ClusterName => "wsrep_cluster_name",
            StatusFact::NodeName => "wsrep_node_name",
            StatusFact::NodeAddress => "wsrep_node_address",
        }
    }

    /// Human label used in failure subjects.
    pub(crate) fn label(self) -> &'static str {
        match self {
            StatusFact::ClusterSize => "cluster size",
            StatusFact::LocalState => "sync state",
            StatusFact::Ready => "readiness",
            StatusFact::ClusterName => "cluster name",
            StatusFact::NodeName => "node name",
            StatusFact::NodeAddress => "node address",
        }
    }
}

/// `SELECT ? AS echo` - connectivity round trip.
pub(crate) fn echo(sentinel: i64) -> Statement {
    Statement::new("SELECT ? AS echo").bind(sentinel)
}

/// `SHOW GLOBAL STATUS LIKE '<variable>'`.
///
/// The variable name comes from [`StatusFact`], never from input, so the
/// interpolation is safe.
pub(crate) fn show_status(fact: StatusFact) -> Statement {
    Statement::new(format!("SHOW GLOBAL STATUS LIKE '{}'", fact.variable()))
}

/// Pull the `Value` column out of a status result.
pub(crate) fn status_value(result: &QueryResult) -> Option<String> {
    result
        .first()
        .and_then(|row| row.get("Value"))
        .map(|value| value.to_text())
}

/// Scratch table DDL: auto-increment id, origin tag, payload.
pub(crate) fn create_scratch(table: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!(
        "CREATE TABLE {table} (\
         id INT AUTO_INCREMENT PRIMARY KEY, \
         origin VARCHAR(32) NOT NULL, \
         payload VARCHAR(128) NOT NULL)"
    ))
}

/// Drop a scratch table, tolerating it being gone already.
pub(crate) fn drop_scratch(table: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!("DROP TABLE IF EXISTS {table}"))
}

/// Insert one tagged row.
pub(crate) fn insert_tagged(table: &str, origin: &str, payload: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!(
        "INSERT INTO {table} (origin, payload) VALUES (?, ?)"
    ))
    .bind(origin)
    .bind(payload)
}

/// Select the rows carrying one origin tag.
pub(crate) fn select_tagged(table: &str, origin: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!(
        "SELECT origin, payload FROM {table} WHERE origin = ? ORDER BY id"
    ))
    .bind(origin)
}

/// Count every row in the table.
pub(crate) fn count_rows(table: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!("SELECT COUNT(*) AS n FROM {table}"))
}

/// Count the rows carrying one origin tag.
pub(crate) fn count_tagged(table: &str, origin: &str) -> Statement {
    debug_assert!(is_safe_identifier(table));
    Statement::new(format!(
        "SELECT COUNT(*) AS n FROM {table} WHERE origin = ?"
    ))
    .bind(origin)
}
