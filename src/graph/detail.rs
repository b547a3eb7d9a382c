//! Detail graph model and builder.

use serde::{Deserialize, Serialize};

use crate::config::MethodParams;
use crate::dataset::{AlignmentDataset, AlignmentMethod};
use crate::graph::arena::FramePair;
use crate::graph::strategy::strategy_for;
use crate::graph::{DetailLink, DetailNode};
use crate::types::{FrameId, NodeSide};

/// A three-tier node/link graph explaining one frame pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailGraph {
    /// Nodes: frame 1 LUs, frame 2 LUs, then intermediates.
    pub nodes: Vec<DetailNode>,
    /// Links by node index.
    pub links: Vec<DetailLink>,
}

impl DetailGraph {
    /// The `{nodes: [], links: []}` graph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node identified by `(name, side)`.
    pub fn find(&self, name: &str, side: NodeSide) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.side == side && n.name == name)
    }

    /// Indices of nodes linking into `idx`.
    pub fn sources_of(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.links
            .iter()
            .filter(move |l| l.target == idx)
            .map(|l| l.source)
    }

    /// Node indices of one column in layout order.
    ///
    /// LU columns sort by descending out-degree, the intermediate column by
    /// descending in-degree. Ties keep node order.
    pub fn tier(&self, side: NodeSide) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.nodes.len())
            .filter(|&i| self.nodes[i].side == side)
            .collect();
        idx.sort_by_key(|&i| {
            let n = &self.nodes[i];
            std::cmp::Reverse(if side.is_lu() { n.out_degree } else { n.in_degree })
        });
        idx
    }
}

/// Builds detail graphs over a loaded dataset.
#[derive(Debug, Clone, Copy)]
pub struct DetailGraphBuilder<'a> {
    dataset: &'a AlignmentDataset,
}

impl<'a> DetailGraphBuilder<'a> {
    /// Create a builder over a loaded dataset.
    pub fn new(dataset: &'a AlignmentDataset) -> Self {
        Self { dataset }
    }

    /// Build the detail graph of `(source, target)` under `method`.
    ///
    /// Unknown frames, methods without a detail view and missing relation
    /// tables all produce the empty graph.
    pub fn build(
        &self,
        method: &AlignmentMethod,
        params: &MethodParams,
        source: &FrameId,
        target: &FrameId,
    ) -> DetailGraph {
        let frames = self.dataset.frames();
        let pair = match (frames.resolve(source), frames.resolve(target)) {
            (Ok(source), Ok(target)) => FramePair { source, target },
            (Err(err), _) | (_, Err(err)) => {
                tracing::debug!(%err, "detail graph for unresolved pair");
                return DetailGraph::empty();
            }
        };

        let Some(strategy) = strategy_for(method.method_type) else {
            tracing::debug!(method = %method.id, "method type has no detail view");
            return DetailGraph::empty();
        };
        let Some(relation) = self.dataset.resources().relation_for(method.method_type) else {
            tracing::debug!(method = %method.id, "no relation table for method type");
            return DetailGraph::empty();
        };

        let graph = strategy.build(pair, relation, params);
        tracing::debug!(
            method = %method.id,
            source = %source,
            target = %target,
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "detail graph built"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawDataset;
    use crate::types::MethodId;

    fn dataset() -> AlignmentDataset {
        let raw = RawDataset::from_json(
            r#"{
                "indices": [["f1"], ["f2"]],
                "alignments": [
                    {"id": "syn", "type": "synset", "data": [[0.5]]},
                    {"id": "attr", "type": "attribute_matching", "data": [[0.5]]}
                ],
                "frames": {
                    "f1": {"name": "Motion", "language": "en", "LUs": ["run.v", "go.v"]},
                    "f2": {"name": "Movimento", "language": "pt", "LUs": ["correr.v"]}
                },
                "resources": {"intermediateRelation": {
                    "run.v": ["s1"], "go.v": ["s2", "s1"], "correr.v": ["s1"]
                }}
            }"#,
        )
        .unwrap();
        AlignmentDataset::from_raw(&raw).unwrap()
    }

    fn method<'d>(ds: &'d AlignmentDataset, id: &str) -> &'d AlignmentMethod {
        ds.method(&MethodId::from(id)).unwrap()
    }

    #[test]
    fn unresolved_pair_and_attribute_method_are_empty() {
        let ds = dataset();
        let params = crate::config::AlignConfig::default().synset_forward;
        let builder = DetailGraphBuilder::new(&ds);

        let g = builder.build(method(&ds, "syn"), &params, &"f1".into(), &"nope".into());
        assert!(g.is_empty() && g.links.is_empty());

        let g = builder.build(method(&ds, "attr"), &params, &"f1".into(), &"f2".into());
        assert!(g.is_empty());
    }

    #[test]
    fn tier_orders_by_degree() {
        let ds = dataset();
        let params = crate::config::AlignConfig::default().synset_forward;
        let g = DetailGraphBuilder::new(&ds).build(method(&ds, "syn"), &params, &"f1".into(), &"f2".into());

        let lus: Vec<&str> = g
            .tier(NodeSide::Frame1Lu)
            .into_iter()
            .map(|i| g.nodes[i].name.as_str())
            .collect();
        assert_eq!(lus, vec!["go.v", "run.v"]);

        let inter: Vec<&str> = g
            .tier(NodeSide::Intermediate)
            .into_iter()
            .map(|i| g.nodes[i].name.as_str())
            .collect();
        assert_eq!(inter, vec!["s1", "s2"]);

        let s1 = g.find("s1", NodeSide::Intermediate).unwrap();
        assert_eq!(g.sources_of(s1).count(), 3);
    }

    #[test]
    fn builds_are_deterministic() {
        let ds = dataset();
        let params = crate::config::AlignConfig::default().synset_forward;
        let builder = DetailGraphBuilder::new(&ds);
        let a = builder.build(method(&ds, "syn"), &params, &"f1".into(), &"f2".into());
        let b = builder.build(method(&ds, "syn"), &params, &"f1".into(), &"f2".into());
        assert_eq!(a, b);
    }
}
