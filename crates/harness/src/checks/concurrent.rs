//! Concurrent write consistency check.
//!
//! Interleaves tagged writes through two independently-held sessions with
//! no coordination between the streams, then verifies every node settles
//! on exactly the same accounting: 2N rows total, N per origin. A dropped
//! write, a duplicated write, or split-brain divergence all show up as a
//! count mismatch on some node.
//!
//! The harness issues the writes serially from one thread; the short gap
//! between statements on the two sessions exercises the cluster's own
//! conflict handling rather than guaranteeing true overlap. Genuine
//! overlapping application would need writes from independent execution
//! contexts with a start barrier.

use clustervet_core::{scratch_table_name, Error, Result, Role};
use tracing::info;

use super::{count_of, node_ids, primary_pair, sql, REPLICATION_WAIT};
use crate::harness::Harness;

/// Writes issued per origin node.
const WRITES_PER_ORIGIN: i64 = 5;

pub fn run(harness: &mut Harness) -> Result<()> {
    let (a, b) = primary_pair(harness)?;
    let table = scratch_table_name("vet_concurrent");
    let create = sql::create_scratch(&table);
    let drop = sql::drop_scratch(&table);

    harness.with_scratch_table(&a, Role::Standard, &create, &drop, |h| {
        for i in 0..WRITES_PER_ORIGIN {
            for origin in [&a, &b] {
                let payload = format!("{origin}-{i}");
                h.execute(
                    origin,
                    Role::Standard,
                    &sql::insert_tagged(&table, origin.as_str(), &payload),
                )?;
            }
        }

        let total = 2 * WRITES_PER_ORIGIN;
        for node in &node_ids(h) {
            // Bounded convergence wait, then exact accounting. Polling for
            // "at least total" first lets duplication surface as an
            // assertion instead of a timeout.
            let settled = h.poll_until(
                node,
                Role::Standard,
                &sql::count_rows(&table),
                REPLICATION_WAIT,
                |rows| count_of(rows).is_some_and(|n| n >= total),
            )?;
            match count_of(&settled) {
                Some(n) if n == total => {}
                observed => {
                    return Err(Error::assertion(
                        format!("total rows on node {node}"),
                        total,
                        observed.map_or_else(|| "no count".to_string(), |n| n.to_string()),
                    ))
                }
            }

            for origin in [&a, &b] {
                let result = h.execute(
                    node,
                    Role::Standard,
                    &sql::count_tagged(&table, origin.as_str()),
                )?;
                match count_of(&result) {
                    Some(n) if n == WRITES_PER_ORIGIN => {}
                    observed => {
                        return Err(Error::assertion(
                            format!("rows tagged {origin} on node {node}"),
                            WRITES_PER_ORIGIN,
                            observed
                                .map_or_else(|| "no count".to_string(), |n| n.to_string()),
                        ))
                    }
                }
            }
            info!(node = %node, total, "write accounting consistent");
        }
        Ok(())
    })
}
