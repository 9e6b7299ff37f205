//! Write replication check.
//!
//! Inserts a tagged row through one node and polls another until the row
//! becomes visible, in both directions, then verifies neither node
//! under- nor over-replicated (final count must be exactly the number of
//! rows inserted). Polling replaces a fixed post-write sleep, so the
//! check adapts to actual convergence latency instead of guessing it.

use clustervet_core::{scratch_table_name, unique_suffix, Error, NodeId, Result, Role};
use tracing::info;

use super::{assert_total_rows, primary_pair, sql, REPLICATION_WAIT};
use crate::harness::Harness;

pub fn run(harness: &mut Harness) -> Result<()> {
    let (a, b) = primary_pair(harness)?;
    let table = scratch_table_name("vet_repl");
    let create = sql::create_scratch(&table);
    let drop = sql::drop_scratch(&table);

    harness.with_scratch_table(&a, Role::Standard, &create, &drop, |h| {
        replicate_one_way(h, &table, &a, &b)?;
        replicate_one_way(h, &table, &b, &a)?;
        for node in [&a, &b] {
            assert_total_rows(h, &table, node, 2)?;
        }
        Ok(())
    })
}

/// Insert through `from`, wait for the row to appear on `to`, and verify
/// the replicated payload byte for byte.
fn replicate_one_way(
    harness: &mut Harness,
    table: &str,
    from: &NodeId,
    to: &NodeId,
) -> Result<()> {
    let payload = format!("payload-{}", unique_suffix());
    harness.execute(
        from,
        Role::Standard,
        &sql::insert_tagged(table, from.as_str(), &payload),
    )?;

    let observed = harness.poll_until(
        to,
        Role::Standard,
        &sql::select_tagged(table, from.as_str()),
        REPLICATION_WAIT,
        |rows| !rows.is_empty(),
    )?;

    if observed.len() != 1 {
        return Err(Error::assertion(
            format!("rows tagged {from} on node {to}"),
            1,
            observed.len(),
        ));
    }
    let replicated = observed[0].get("payload").map(|v| v.to_text());
    if replicated.as_deref() != Some(payload.as_str()) {
        return Err(Error::assertion(
            format!("payload replicated from {from} to {to}"),
            payload,
            replicated.unwrap_or_else(|| "missing".to_string()),
        ));
    }

    info!(from = %from, to = %to, "write replicated");
    Ok(())
}
