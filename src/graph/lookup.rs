//! Filter a graph's node stream down to requested haplotype IDs.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::matrix::HapId;

/// One node of the pangenome graph, as seen by the lookup.
///
/// Implemented by the caller over whatever graph representation it holds;
/// the lookup only needs the node's ID and its haplotype sequence.
pub trait GraphNode {
    fn hap_id(&self) -> HapId;

    fn sequence(&self) -> String;
}

/// A haplotype ID paired with its sequence, as returned by
/// [`lookup_sequences`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaplotypeSequence {
    pub hap_id: HapId,
    pub sequence: String,
}

/// Collect `(id, sequence)` pairs for every node whose ID is in
/// `requested`.
///
/// Results come back in graph traversal order, not requested-ID order.
/// Requested IDs with no matching node are silently omitted.
pub fn lookup_sequences<N, I>(nodes: I, requested: &HashSet<HapId>) -> Vec<HaplotypeSequence>
where
    N: GraphNode,
    I: IntoIterator<Item = N>,
{
    let mut sequences = Vec::new();
    for node in nodes {
        let hap_id = node.hap_id();
        if requested.contains(&hap_id) {
            debug!(hap_id, "node found");
            sequences.push(HaplotypeSequence {
                hap_id,
                sequence: node.sequence(),
            });
        }
    }
    sequences
}
