//! Per-method-type detail graph strategies.
//!
//! Every strategy shares the same linking pass ([`TierArena::link`]) and
//! differs only in how it filters, orients and classifies the result.

use petgraph::Direction;

use crate::config::MethodParams;
use crate::dataset::IntermediateRelation;
use crate::graph::arena::{FramePair, TierArena};
use crate::graph::DetailGraph;
use crate::types::{MethodType, NodeSide};

/// Builds one detail graph for a frame pair.
pub trait DetailStrategy: Sync {
    /// Build the graph explaining `pair` through `relation`.
    fn build(
        &self,
        pair: FramePair<'_>,
        relation: &dyn IntermediateRelation,
        params: &MethodParams,
    ) -> DetailGraph;
}

/// Forward projection: frame 1 LUs project onto intermediates that frame 2
/// LUs also reach. The result always flows frame1LU -> intermediate ->
/// frame2LU.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionStrategy;

impl DetailStrategy for ProjectionStrategy {
    fn build(
        &self,
        pair: FramePair<'_>,
        relation: &dyn IntermediateRelation,
        params: &MethodParams,
    ) -> DetailGraph {
        let mut arena = TierArena::link(pair, relation, params);
        let shared = arena.intersections();
        let graph = arena.graph_mut();

        graph.retain_edges(|g, e| {
            g.edge_endpoints(e)
                .map_or(false, |(_, target)| shared.contains(&target))
        });
        graph.retain_nodes(|g, n| {
            g.node_weight(n)
                .map_or(false, |node| node.side.is_lu() || shared.contains(&n))
        });

        let flipped: Vec<_> = graph
            .edge_indices()
            .filter_map(|e| {
                let (source, target) = graph.edge_endpoints(e)?;
                (graph[source].side == NodeSide::Frame2Lu).then_some((e, source, target))
            })
            .collect();
        for (edge, lu, intermediate) in flipped {
            graph.remove_edge(edge);
            graph.add_edge(intermediate, lu, ());
        }

        for idx in arena.nodes() {
            let graph = arena.graph_mut();
            if graph[idx].side != NodeSide::Frame1Lu {
                continue;
            }
            let matched = graph
                .neighbors_directed(idx, Direction::Outgoing)
                .any(|t| shared.contains(&t));
            let node = &mut graph[idx];
            node.is_reference_node = true;
            node.is_matching_node = matched;
        }

        arena.finish()
    }
}

/// Symmetric synset overlap. Links are kept as built; only the reference
/// column depends on direction.
#[derive(Debug, Clone, Copy)]
pub struct SynsetStrategy {
    /// LU column counted as reference.
    pub reference: NodeSide,
}

impl DetailStrategy for SynsetStrategy {
    fn build(
        &self,
        pair: FramePair<'_>,
        relation: &dyn IntermediateRelation,
        params: &MethodParams,
    ) -> DetailGraph {
        let mut arena = TierArena::link(pair, relation, params);
        let shared = arena.intersections();

        for idx in arena.nodes() {
            let graph = arena.graph_mut();
            let side = graph[idx].side;
            let matched = match side {
                NodeSide::Intermediate => shared.contains(&idx),
                NodeSide::Frame1Lu | NodeSide::Frame2Lu => graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .any(|t| shared.contains(&t)),
            };
            let node = &mut graph[idx];
            node.is_matching_node = matched;
            node.is_reference_node = side == self.reference;
        }

        arena.finish()
    }
}

static PROJECTION: ProjectionStrategy = ProjectionStrategy;
static SYNSET_FORWARD: SynsetStrategy = SynsetStrategy {
    reference: NodeSide::Frame1Lu,
};
static SYNSET_INVERSE: SynsetStrategy = SynsetStrategy {
    reference: NodeSide::Frame2Lu,
};

/// Strategy for a method type; `None` for types without a detail view.
pub fn strategy_for(method_type: MethodType) -> Option<&'static dyn DetailStrategy> {
    match method_type {
        MethodType::WordnetProjection | MethodType::EmbeddingNeighbor => Some(&PROJECTION),
        MethodType::SynsetForward => Some(&SYNSET_FORWARD),
        MethodType::SynsetInverse => Some(&SYNSET_INVERSE),
        MethodType::AttributeMatching | MethodType::Unrecognized => None,
    }
}
