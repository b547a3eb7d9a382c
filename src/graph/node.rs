//! Detail graph node and link definitions.

use serde::{Deserialize, Serialize};

use crate::types::NodeSide;

/// A node of a three-tier detail graph.
///
/// Identity is `(name, side)` within one graph only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailNode {
    /// LU name or intermediate id.
    pub name: String,
    /// Column of the node.
    pub side: NodeSide,
    /// Incoming link count.
    pub in_degree: u32,
    /// Outgoing link count.
    pub out_degree: u32,
    /// Counted in the denominator of the alignment score.
    pub is_reference_node: bool,
    /// Reached from both frames of the pair.
    pub is_matching_node: bool,
}

impl DetailNode {
    /// Create a node with no links and no flags.
    pub fn new(name: impl Into<String>, side: NodeSide) -> Self {
        Self {
            name: name.into(),
            side,
            in_degree: 0,
            out_degree: 0,
            is_reference_node: false,
            is_matching_node: false,
        }
    }
}

/// A directed link between two nodes, by index into the node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DetailLink {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
}
