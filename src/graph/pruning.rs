//! Pruning logic: per-source top-K edge limiting.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::graph::AlignmentEdge;
use crate::types::FrameId;

/// Functions related to pruning flow edges.
#[derive(Debug)]
pub struct EdgePruner;

impl EdgePruner {
    /// Keep at most `k` edges per source frame.
    ///
    /// Within a source group edges rank by score descending, then target id
    /// ascending, then input position. Groups of size `<= k` are untouched.
    /// The survivors keep their input order.
    pub fn limit_per_source<'a>(edges: Vec<&'a AlignmentEdge>, k: usize) -> Vec<&'a AlignmentEdge> {
        let mut groups: HashMap<&'a FrameId, Vec<usize>> = HashMap::new();
        for (pos, edge) in edges.iter().copied().enumerate() {
            groups.entry(&edge.source).or_default().push(pos);
        }

        let mut keep = vec![false; edges.len()];
        let mut dropped = 0usize;

        for positions in groups.values_mut() {
            if positions.len() > k {
                positions.sort_by(|&a, &b| rank(edges[a], edges[b]).then(a.cmp(&b)));
                dropped += positions.len() - k;
                positions.truncate(k);
            }
            for &pos in positions.iter() {
                keep[pos] = true;
            }
        }

        tracing::debug!(k, dropped, "pruned flow edges");

        edges
            .into_iter()
            .zip(keep)
            .filter_map(|(edge, kept)| kept.then_some(edge))
            .collect()
    }
}

fn rank(a: &AlignmentEdge, b: &AlignmentEdge) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.target.cmp(&b.target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(s: &str, t: &str, score: f64) -> AlignmentEdge {
        AlignmentEdge::new(s.into(), t.into(), score)
    }

    #[test]
    fn keeps_top_k_per_source_in_input_order() {
        let edges = vec![
            edge("a", "x", 0.2),
            edge("a", "y", 0.9),
            edge("b", "x", 0.1),
            edge("a", "z", 0.5),
        ];
        let kept = EdgePruner::limit_per_source(edges.iter().collect(), 2);
        let pairs: Vec<(&str, &str)> = kept
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "y"), ("b", "x"), ("a", "z")]);
    }

    #[test]
    fn ties_break_by_target_id() {
        let edges = vec![edge("a", "z", 0.5), edge("a", "m", 0.5), edge("a", "b", 0.5)];
        let kept = EdgePruner::limit_per_source(edges.iter().collect(), 2);
        let targets: Vec<&str> = kept.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["m", "b"]);
    }

    #[test]
    fn zero_keeps_nothing() {
        let edges = vec![edge("a", "x", 0.5)];
        assert!(EdgePruner::limit_per_source(edges.iter().collect(), 0).is_empty());
    }
}
