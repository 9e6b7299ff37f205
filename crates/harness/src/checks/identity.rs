//! Node identity check.
//!
//! Every node must report a name no other node reports, and its
//! advertised address must match the configured one. Catches the classic
//! cloned-configuration mistake where two members come up with the same
//! identity.

use clustervet_core::{Error, NodeId, Result};
use tracing::info;

use super::{node_ids, read_status, sql::StatusFact};
use crate::harness::Harness;

pub fn run(harness: &mut Harness) -> Result<()> {
    let mut seen: Vec<(NodeId, String)> = Vec::new();

    for node in &node_ids(harness) {
        let name = read_status(harness, node, StatusFact::NodeName)?;
        if let Some((other, _)) = seen.iter().find(|(_, n)| *n == name) {
            return Err(Error::assertion(
                format!("node name uniqueness ({other} vs {node})"),
                "pairwise distinct names",
                format!("both report {name:?}"),
            ));
        }

        let advertised = read_status(harness, node, StatusFact::NodeAddress)?;
        // The advertised address may carry a replication port suffix.
        let host = advertised.split(':').next().unwrap_or(&advertised);
        let configured = harness
            .config()
            .node(node)
            .map(|n| n.address.clone())
            .unwrap_or_default();
        if host != configured {
            return Err(Error::assertion(
                format!("advertised address on node {node}"),
                configured,
                advertised,
            ));
        }

        info!(node = %node, name = %name, "identity ok");
        seen.push((node.clone(), name));
    }
    Ok(())
}
