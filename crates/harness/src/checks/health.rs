//! Cluster health check.
//!
//! For every node, four facts must hold: the reported cluster size equals
//! the configured member count, the local state is fully synced, the node
//! is ready for reads and writes, and the cluster name matches. Any one
//! violation fails the check, naming the node and the fact.

use clustervet_core::{Error, Result};
use tracing::info;

use super::{node_ids, read_status, sql::StatusFact};
use crate::harness::Harness;

pub fn run(harness: &mut Harness) -> Result<()> {
    let expected_size = harness.config().expected_size();
    let expected_name = harness.config().cluster_name.clone();

    for node in &node_ids(harness) {
        let size = read_status(harness, node, StatusFact::ClusterSize)?;
        if size.trim().parse::<usize>() != Ok(expected_size) {
            return Err(Error::assertion(
                format!("cluster size on node {node}"),
                expected_size,
                size,
            ));
        }

        let state = read_status(harness, node, StatusFact::LocalState)?;
        if state != super::sql::SYNCED_STATE {
            return Err(Error::assertion(
                format!("sync state on node {node}"),
                super::sql::SYNCED_STATE,
                state,
            ));
        }

        let ready = read_status(harness, node, StatusFact::Ready)?;
        if ready != super::sql::READY {
            return Err(Error::assertion(
                format!("readiness on node {node}"),
                super::sql::READY,
                ready,
            ));
        }

        let name = read_status(harness, node, StatusFact::ClusterName)?;
        if name != expected_name {
            return Err(Error::assertion(
                format!("cluster name on node {node}"),
                &expected_name,
                name,
            ));
        }

        info!(node = %node, "cluster status ok");
    }
    Ok(())
}
