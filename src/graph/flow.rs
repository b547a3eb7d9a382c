//! Flow-diagram (bipartite view) construction.

use std::collections::BTreeSet;

use crate::config::MethodParams;
use crate::dataset::AlignmentDataset;
use crate::graph::{AlignmentEdge, EdgePruner, FlowEdge};
use crate::types::{FrameId, MethodId};

/// Builds the flow-diagram edge list for one alignment method.
#[derive(Debug, Clone, Copy)]
pub struct FlowViewBuilder<'a> {
    dataset: &'a AlignmentDataset,
}

impl<'a> FlowViewBuilder<'a> {
    /// Create a builder over a loaded dataset.
    pub fn new(dataset: &'a AlignmentDataset) -> Self {
        Self { dataset }
    }

    /// Edges of `method` filtered by selection and threshold, then pruned
    /// when `params.limit_edges` is set.
    ///
    /// In union mode an edge survives when either endpoint is selected, in
    /// intersection mode (`filter_to_selected_frames`) when both are.
    pub fn build(
        &self,
        method: &MethodId,
        params: &MethodParams,
        selected: &BTreeSet<FrameId>,
    ) -> Vec<FlowEdge> {
        let intersection = params.filter_to_selected_frames;

        let mut kept: Vec<&AlignmentEdge> = self
            .dataset
            .edges(method)
            .iter()
            .filter(|e| {
                let s = selected.contains(&e.source);
                let t = selected.contains(&e.target);
                let touches = if intersection { s && t } else { s || t };
                touches && e.score >= params.threshold
            })
            .collect();

        if let Some(k) = params.edge_limit() {
            kept = EdgePruner::limit_per_source(kept, k);
        }

        let frames = self.dataset.frames();
        kept.into_iter()
            .filter_map(|e| {
                let source = frames.get(&e.source)?;
                let target = frames.get(&e.target)?;
                Some(FlowEdge {
                    source_label: source.label(),
                    target_label: target.label(),
                    score: e.score,
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawDataset;

    fn dataset() -> AlignmentDataset {
        let raw = RawDataset::from_json(
            r#"{
                "indices": [["a", "b"], ["x", "y", "z"]],
                "alignments": [{"id": "m", "type": "attribute_matching",
                    "data": [[0.9, 0.5, 0.05], [0.3, 0.0, 0.7]]}],
                "frames": {
                    "a": {"name": "A", "language": "en", "LUs": []},
                    "b": {"name": "B", "language": "en", "LUs": []},
                    "x": {"name": "X", "language": "pt", "LUs": []},
                    "y": {"name": "Y", "language": "pt", "LUs": []},
                    "z": {"name": "Z", "language": "pt", "LUs": []}
                }
            }"#,
        )
        .unwrap();
        AlignmentDataset::from_raw(&raw).unwrap()
    }

    fn params(threshold: f64) -> MethodParams {
        MethodParams {
            threshold,
            top_k: None,
            limit_edges: false,
            filter_to_selected_frames: false,
        }
    }

    fn select(ids: &[&str]) -> BTreeSet<FrameId> {
        ids.iter().map(|s| FrameId::from(*s)).collect()
    }

    fn labels(edges: &[FlowEdge]) -> Vec<(String, String)> {
        edges
            .iter()
            .map(|e| (e.source_label.clone(), e.target_label.clone()))
            .collect()
    }

    #[test]
    fn union_mode_touches_selection() {
        let ds = dataset();
        let out = FlowViewBuilder::new(&ds).build(&"m".into(), &params(0.1), &select(&["x"]));
        assert_eq!(
            labels(&out),
            vec![
                ("A.en".to_string(), "X.pt".to_string()),
                ("B.en".to_string(), "X.pt".to_string()),
            ]
        );
    }

    #[test]
    fn intersection_mode_requires_both_ends() {
        let ds = dataset();
        let mut p = params(0.1);
        p.filter_to_selected_frames = true;
        let out = FlowViewBuilder::new(&ds).build(&"m".into(), &p, &select(&["a", "y"]));
        assert_eq!(labels(&out), vec![("A.en".to_string(), "Y.pt".to_string())]);
    }

    #[test]
    fn threshold_and_pruning() {
        let ds = dataset();
        let all = select(&["a", "b", "x", "y", "z"]);
        let out = FlowViewBuilder::new(&ds).build(&"m".into(), &params(0.1), &all);
        assert!(out.iter().all(|e| e.score >= 0.1));
        assert_eq!(out.len(), 4);

        let mut p = params(0.0);
        p.limit_edges = true;
        p.top_k = Some(1);
        let pruned = FlowViewBuilder::new(&ds).build(&"m".into(), &p, &all);
        assert_eq!(
            labels(&pruned),
            vec![
                ("A.en".to_string(), "X.pt".to_string()),
                ("B.en".to_string(), "Z.pt".to_string()),
            ]
        );
    }

    #[test]
    fn empty_selection_yields_nothing() {
        let ds = dataset();
        let out = FlowViewBuilder::new(&ds).build(&"m".into(), &params(0.0), &BTreeSet::new());
        assert!(out.is_empty());
    }
}
