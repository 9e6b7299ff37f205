//! The check library.
//!
//! Each check is an independent function from the harness to a pass/fail
//! result. Checks do not depend on each other's side effects except
//! through the shared cluster state they observe, and any table a check
//! creates is removed before the check completes, even on failure.
//!
//! The statements target a Galera-style cluster: status is read through
//! `wsrep_*` status variables, data checks go through ordinary DML.

pub mod concurrent;
pub mod connectivity;
pub mod health;
pub mod identity;
pub mod replication;

pub(crate) mod sql;

use std::time::Duration;

use clustervet_core::{Error, NodeId, QueryResult, Result, Role, Value};

use crate::harness::Harness;
use crate::poll::PollConfig;
use crate::runner::Check;

use sql::StatusFact;

/// Default window for replication convergence waits.
///
/// Wide enough for a loaded cluster, bounded so a dead node fails the
/// check instead of hanging the suite.
pub(crate) const REPLICATION_WAIT: PollConfig =
    PollConfig::new(Duration::from_millis(200), Duration::from_secs(10));

/// The full suite, in execution order.
pub fn default_suite() -> Vec<Check> {
    vec![
        Check::new("node_connectivity", connectivity::run),
        Check::new("cluster_health", health::run),
        Check::new("node_identity", identity::run),
        Check::new("write_replication", replication::run),
        Check::new("concurrent_write_consistency", concurrent::run),
    ]
}

/// All configured node ids, in check order.
pub(crate) fn node_ids(harness: &Harness) -> Vec<NodeId> {
    harness.config().nodes.iter().map(|n| n.id.clone()).collect()
}

/// The first two configured nodes, used as the write-origin pair.
pub(crate) fn primary_pair(harness: &Harness) -> Result<(NodeId, NodeId)> {
    let mut ids = harness.config().nodes.iter().map(|n| n.id.clone());
    match (ids.next(), ids.next()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(Error::config("at least two nodes are required")),
    }
}

/// Read one status fact from a node, privileged role.
pub(crate) fn read_status(
    harness: &mut Harness,
    node: &NodeId,
    fact: StatusFact,
) -> Result<String> {
    let result = harness.execute(node, Role::Privileged, &sql::show_status(fact))?;
    sql::status_value(&result).ok_or_else(|| {
        Error::assertion(
            format!("{} on node {node}", fact.label()),
            "a reported value",
            "status variable absent",
        )
    })
}

/// Extract the count from a `SELECT COUNT(*) AS n` result.
pub(crate) fn count_of(result: &QueryResult) -> Option<i64> {
    result.first().and_then(|row| row.get("n")).and_then(Value::as_int)
}

/// Assert the total row count a node reports for `table`.
pub(crate) fn assert_total_rows(
    harness: &mut Harness,
    table: &str,
    node: &NodeId,
    expected: i64,
) -> Result<()> {
    let result = harness.execute(node, Role::Standard, &sql::count_rows(table))?;
    match count_of(&result) {
        Some(n) if n == expected => Ok(()),
        observed => Err(Error::assertion(
            format!("total rows on node {node}"),
            expected,
            observed.map_or_else(|| "no count".to_string(), |n| n.to_string()),
        )),
    }
}
