//! Alignment score summary over a detail graph.

use serde::Serialize;

use crate::graph::DetailGraph;
use crate::types::NodeSide;

/// Counts behind the alignment score shown under a detail graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSummary {
    /// Nodes flagged matching.
    pub matching: usize,
    /// Reference nodes that are not matching.
    pub reference_only: usize,
    /// `matching / (matching + reference_only)`.
    pub score: Option<f64>,
    /// Intermediate nodes in the graph.
    pub intermediates: usize,
    /// Intermediate nodes flagged matching.
    pub matching_intermediates: usize,
}

impl DetailSummary {
    /// Summarise the node flags of a graph.
    pub fn from_graph(graph: &DetailGraph) -> Self {
        let mut s = Self::default();

        for node in &graph.nodes {
            if node.is_matching_node {
                s.matching += 1;
            } else if node.is_reference_node {
                s.reference_only += 1;
            }
            if node.side == NodeSide::Intermediate {
                s.intermediates += 1;
                if node.is_matching_node {
                    s.matching_intermediates += 1;
                }
            }
        }

        let denom = s.matching + s.reference_only;
        s.score = (denom > 0).then(|| s.matching as f64 / denom as f64);
        s
    }

    /// Share of intermediates reached from both frames.
    pub fn intermediate_overlap(&self) -> Option<f64> {
        (self.intermediates > 0)
            .then(|| self.matching_intermediates as f64 / self.intermediates as f64)
    }
}
