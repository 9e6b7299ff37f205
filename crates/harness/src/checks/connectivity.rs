//! Connectivity check: a trivial round trip against every node.
//!
//! Sends a distinct sentinel per node and verifies the node echoes it
//! back, so a misrouted or cached answer cannot pass for the wrong node.

use clustervet_core::{Error, Result, Role, Value};
use tracing::info;

use super::{node_ids, sql};
use crate::harness::Harness;

pub fn run(harness: &mut Harness) -> Result<()> {
    for (index, node) in node_ids(harness).iter().enumerate() {
        let sentinel = 41 + index as i64;
        let result = harness.execute(node, Role::Standard, &sql::echo(sentinel))?;
        let echoed = result
            .first()
            .and_then(|row| row.get("echo"))
            .and_then(Value::as_int);
        if echoed != Some(sentinel) {
            return Err(Error::assertion(
                format!("echo round-trip on node {node}"),
                sentinel,
                echoed.map_or_else(|| "no row".to_string(), |v| v.to_string()),
            ));
        }
        info!(node = %node, "round-trip ok");
    }
    Ok(())
}
