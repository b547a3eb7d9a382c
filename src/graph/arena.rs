//! Per-call node arena for detail graph construction.
//!
//! Nodes live in a `StableDiGraph` so strategies can drop links and nodes
//! without invalidating the indices they hold. Nothing here outlives one
//! builder call.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use crate::config::MethodParams;
use crate::dataset::{Frame, IntermediateRelation};
use crate::graph::{DetailGraph, DetailLink, DetailNode};
use crate::types::NodeSide;

/// The frame pair a detail graph explains.
#[derive(Debug, Clone, Copy)]
pub struct FramePair<'a> {
    /// Frame whose LUs form the left column.
    pub source: &'a Frame,
    /// Frame whose LUs form the right column.
    pub target: &'a Frame,
}

/// Three-tier graph under construction.
#[derive(Debug, Default)]
pub struct TierArena {
    graph: StableDiGraph<DetailNode, ()>,
    intermediates: HashMap<String, NodeIndex>,
    order: Vec<NodeIndex>,
}

impl TierArena {
    /// LU nodes for both frames, linked to every intermediate id their
    /// relation yields. Intermediate ids shared by several LUs converge on
    /// one node.
    pub fn link(pair: FramePair<'_>, relation: &dyn IntermediateRelation, params: &MethodParams) -> Self {
        let mut arena = Self::default();
        let mut lus = Vec::with_capacity(pair.source.lus.len() + pair.target.lus.len());

        for (frame, side) in [
            (pair.source, NodeSide::Frame1Lu),
            (pair.target, NodeSide::Frame2Lu),
        ] {
            let mut seen = HashSet::new();
            for lu in &frame.lus {
                if seen.insert(lu.as_str()) {
                    let idx = arena.add_node(DetailNode::new(lu.clone(), side));
                    lus.push((idx, lu.as_str()));
                }
            }
        }

        for (lu_idx, lu) in lus {
            let mut linked = HashSet::new();
            for id in relation.related(lu, params) {
                if !linked.insert(id.clone()) {
                    continue;
                }
                let inter_idx = arena.intermediate(id);
                arena.graph.add_edge(lu_idx, inter_idx, ());
            }
        }

        arena
    }

    fn add_node(&mut self, node: DetailNode) -> NodeIndex {
        let idx = self.graph.add_node(node);
        self.order.push(idx);
        idx
    }

    fn intermediate(&mut self, id: String) -> NodeIndex {
        if let Some(&idx) = self.intermediates.get(&id) {
            return idx;
        }
        let idx = self.add_node(DetailNode::new(id.clone(), NodeSide::Intermediate));
        self.intermediates.insert(id, idx);
        idx
    }

    /// Intermediate nodes with incoming links from both LU columns.
    pub fn intersections(&self) -> HashSet<NodeIndex> {
        self.intermediates
            .values()
            .copied()
            .filter(|&idx| {
                let mut from_first = false;
                let mut from_second = false;
                for src in self.graph.neighbors_directed(idx, Direction::Incoming) {
                    match self.graph[src].side {
                        NodeSide::Frame1Lu => from_first = true,
                        NodeSide::Frame2Lu => from_second = true,
                        NodeSide::Intermediate => {}
                    }
                }
                from_first && from_second
            })
            .collect()
    }

    /// Live node indices in creation order.
    pub fn nodes(&self) -> Vec<NodeIndex> {
        self.order
            .iter()
            .copied()
            .filter(|&idx| self.graph.contains_node(idx))
            .collect()
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &StableDiGraph<DetailNode, ()> {
        &self.graph
    }

    /// Mutable access to the underlying graph.
    pub fn graph_mut(&mut self) -> &mut StableDiGraph<DetailNode, ()> {
        &mut self.graph
    }

    /// Compute degrees and flatten into the output model.
    ///
    /// Nodes keep creation order (frame 1 LUs, frame 2 LUs, intermediates);
    /// links are sorted by `(source, target)` position.
    pub fn finish(mut self) -> DetailGraph {
        let live = self.nodes();

        for &idx in &live {
            let in_degree = self.graph.neighbors_directed(idx, Direction::Incoming).count();
            let out_degree = self.graph.neighbors_directed(idx, Direction::Outgoing).count();
            let node = &mut self.graph[idx];
            node.in_degree = in_degree as u32;
            node.out_degree = out_degree as u32;
        }

        let position: HashMap<NodeIndex, usize> =
            live.iter().enumerate().map(|(pos, &idx)| (idx, pos)).collect();

        let mut links: Vec<DetailLink> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (s, t) = self.graph.edge_endpoints(e)?;
                Some(DetailLink {
                    source: *position.get(&s)?,
                    target: *position.get(&t)?,
                })
            })
            .collect();
        links.sort_unstable();

        let nodes = live
            .into_iter()
            .filter_map(|idx| self.graph.remove_node(idx))
            .collect();

        DetailGraph { nodes, links }
    }
}
