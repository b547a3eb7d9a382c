//! Explainability for intermediate nodes.
//!
//! Shows the resource behind a shared synset / neighbour token and which of
//! its lemmas correspond to the LUs linked to it.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::dataset::ResourceIndex;
use crate::graph::DetailGraph;
use crate::types::NodeSide;

/// A lemma of an intermediate resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightedLemma {
    /// The lemma text.
    pub lemma: String,
    /// Whether an LU linked to the node has this lemma.
    pub highlighted: bool,
}

/// Why an intermediate node connects the LUs it connects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateExplanation {
    /// Intermediate id.
    pub id: String,
    /// Definition from the resource metadata, empty when unknown.
    pub definition: String,
    /// Language code -> lemmas.
    pub lemmas: BTreeMap<String, Vec<HighlightedLemma>>,
    /// LU names linked to the node, in node order.
    pub linked_lus: Vec<String>,
}

/// Explain the intermediate node at `node`; `None` for LU nodes and
/// out-of-range indices.
pub fn explain_intermediate(
    graph: &DetailGraph,
    node: usize,
    resources: &ResourceIndex,
) -> Option<IntermediateExplanation> {
    let target = graph.nodes.get(node)?;
    if target.side != NodeSide::Intermediate {
        return None;
    }

    let mut linked: Vec<usize> = graph
        .links
        .iter()
        .filter_map(|l| {
            if l.target == node {
                Some(l.source)
            } else if l.source == node {
                Some(l.target)
            } else {
                None
            }
        })
        .collect();
    linked.sort_unstable();
    linked.dedup();

    let linked_lus: Vec<String> = linked
        .into_iter()
        .map(|i| graph.nodes[i].name.clone())
        .collect();
    let stems: HashSet<&str> = linked_lus.iter().map(|lu| strip_pos(lu)).collect();

    let info = resources.info(&target.name);
    let lemmas = info
        .map(|info| {
            info.lemmas
                .iter()
                .map(|(lang, words)| {
                    let marked = words
                        .iter()
                        .map(|w| HighlightedLemma {
                            lemma: w.clone(),
                            highlighted: stems.contains(w.as_str()),
                        })
                        .collect();
                    (lang.clone(), marked)
                })
                .collect()
        })
        .unwrap_or_default();

    Some(IntermediateExplanation {
        id: target.name.clone(),
        definition: info.map(|i| i.definition.clone()).unwrap_or_default(),
        lemmas,
        linked_lus,
    })
}

/// Drop a part-of-speech suffix such as `.v` or `.adj` from an LU name.
pub fn strip_pos(lu: &str) -> &str {
    match lu.rsplit_once('.') {
        Some((stem, pos))
            if !stem.is_empty()
                && (1..=3).contains(&pos.chars().count())
                && pos.chars().all(|c| c.is_alphanumeric() || c == '_') =>
        {
            stem
        }
        _ => lu,
    }
}
