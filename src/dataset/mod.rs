//! Dataset loading: document model, frame/resource indices, edge lists.

pub mod document;
pub mod frames;
/// Dense matrix to sparse edge conversion.
pub mod loader;
pub mod relation;
pub mod resources;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;

pub use document::RawDataset;
pub use frames::{Frame, FrameIndex};
pub use loader::matrix_to_edges;
pub use relation::{IntermediateRelation, RankedRelation, Relation, SynsetMembership};
pub use resources::{IntermediateInfo, ResourceIndex};

use crate::errors::{AlignError, Result};
use crate::graph::AlignmentEdge;
use crate::types::{MethodId, MethodType};

/// An alignment method as loaded from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentMethod {
    /// Method id, unique within the dataset.
    pub id: MethodId,
    /// Scoring method type.
    #[serde(rename = "type")]
    pub method_type: MethodType,
    /// Human readable description.
    pub description: String,
}

/// A fully loaded dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct AlignmentDataset {
    frames: FrameIndex,
    resources: ResourceIndex,
    methods: Vec<AlignmentMethod>,
    edges: HashMap<MethodId, Vec<AlignmentEdge>>,
}

impl AlignmentDataset {
    /// Build every index and edge list from a document.
    ///
    /// All-or-nothing: any structural problem fails the whole load.
    pub fn from_raw(raw: &RawDataset) -> Result<Self> {
        let [rows, cols] = match raw.indices.as_slice() {
            [rows, cols] => [rows.clone(), cols.clone()],
            other => {
                return Err(AlignError::MalformedDataset(format!(
                    "expected 2 index arrays, found {}",
                    other.len()
                )))
            }
        };

        check_required_resources(raw)?;

        let frames = FrameIndex::new(&raw.frames, [rows, cols]);
        let resources = ResourceIndex::new(&raw.resources);

        let mut methods = Vec::with_capacity(raw.alignments.len());
        let mut edges = HashMap::with_capacity(raw.alignments.len());

        for (pos, alignment) in raw.alignments.iter().enumerate() {
            let id = alignment
                .id
                .clone()
                .unwrap_or_else(|| MethodId(pos.to_string()));
            if edges.contains_key(&id) {
                return Err(AlignError::MalformedDataset(format!(
                    "duplicate alignment id {id}"
                )));
            }

            let all = matrix_to_edges(&alignment.matrix, frames.inventory(0), frames.inventory(1))
                .map_err(|e| match e {
                    AlignError::MalformedDataset(msg) => {
                        AlignError::MalformedDataset(format!("alignment {id}: {msg}"))
                    }
                    other => other,
                })?;

            let total = all.len();
            let resolved: Vec<AlignmentEdge> = all
                .into_iter()
                .filter(|e| match (frames.resolve(&e.source), frames.resolve(&e.target)) {
                    (Ok(_), Ok(_)) => true,
                    (Err(err), _) | (_, Err(err)) => {
                        tracing::debug!(%err, method = %id, "excluding edge");
                        false
                    }
                })
                .collect();

            tracing::debug!(
                method = %id,
                edges = resolved.len(),
                excluded = total - resolved.len(),
                "alignment loaded"
            );

            methods.push(AlignmentMethod {
                id: id.clone(),
                method_type: alignment.method_type,
                description: alignment.description.clone(),
            });
            edges.insert(id, resolved);
        }

        tracing::info!(
            frames = frames.len(),
            methods = methods.len(),
            "dataset loaded"
        );

        Ok(Self {
            frames,
            resources,
            methods,
            edges,
        })
    }

    /// Parse and load a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_raw(&RawDataset::from_path(path)?)
    }

    /// Frame lookups.
    pub fn frames(&self) -> &FrameIndex {
        &self.frames
    }

    /// Resource lookups.
    pub fn resources(&self) -> &ResourceIndex {
        &self.resources
    }

    /// Methods in document order.
    pub fn methods(&self) -> &[AlignmentMethod] {
        &self.methods
    }

    /// Method by id.
    pub fn method(&self, id: &MethodId) -> Option<&AlignmentMethod> {
        self.methods.iter().find(|m| &m.id == id)
    }

    /// Edge list of a method; empty for unknown ids.
    pub fn edges(&self, id: &MethodId) -> &[AlignmentEdge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn check_required_resources(raw: &RawDataset) -> Result<()> {
    let types: HashSet<MethodType> = raw.alignments.iter().map(|a| a.method_type).collect();
    let res = &raw.resources;

    let needs_intermediate = types.iter().any(|t| {
        matches!(
            t,
            MethodType::WordnetProjection | MethodType::SynsetForward | MethodType::SynsetInverse
        )
    });
    if needs_intermediate && res.intermediate_relation.is_none() {
        return Err(AlignError::MalformedDataset(
            "resources.intermediateRelation is required by synset alignments".into(),
        ));
    }

    if types.contains(&MethodType::EmbeddingNeighbor)
        && (res.embedding_neighbors.is_none() || res.embedding_vocabulary.is_none())
    {
        return Err(AlignError::MalformedDataset(
            "resources.embeddingNeighbors and embeddingVocabulary are required by embedding alignments"
                .into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameId;

    fn doc(json: &str) -> RawDataset {
        RawDataset::from_json(json).unwrap()
    }

    #[test]
    fn loads_methods_and_edges() {
        let raw = doc(
            r#"{
                "indices": [["f1"], ["f2", "f3"]],
                "alignments": [{"id": "attr", "type": "attribute_matching", "desc": "Attributes", "data": [[0.4, 0.0]]}],
                "frames": {
                    "f1": {"name": "Motion", "language": "en", "LUs": []},
                    "f2": {"name": "Movimento", "language": "pt", "LUs": []}
                }
            }"#,
        );
        let ds = AlignmentDataset::from_raw(&raw).unwrap();
        assert_eq!(ds.methods().len(), 1);
        let edges = ds.edges(&MethodId::from("attr"));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, FrameId::from("f2"));
        assert!(ds.edges(&MethodId::from("missing")).is_empty());
    }

    #[test]
    fn edges_to_unknown_frames_are_excluded() {
        let raw = doc(
            r#"{
                "indices": [["f1"], ["f2", "ghost"]],
                "alignments": [{"type": "attribute_matching", "data": [[0.4, 0.9]]}],
                "frames": {
                    "f1": {"name": "A", "language": "en", "LUs": []},
                    "f2": {"name": "B", "language": "pt", "LUs": []}
                }
            }"#,
        );
        let ds = AlignmentDataset::from_raw(&raw).unwrap();
        let edges = ds.edges(&MethodId::from("0"));
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, FrameId::from("f2"));
    }

    #[test]
    fn wrong_index_count_is_malformed() {
        let raw = doc(r#"{"indices": [["f1"]], "alignments": []}"#);
        assert!(matches!(
            AlignmentDataset::from_raw(&raw),
            Err(AlignError::MalformedDataset(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let raw = doc(
            r#"{"indices": [[], []], "alignments": [
                {"id": "m", "type": "attribute_matching", "data": []},
                {"id": "m", "type": "attribute_matching", "data": []}
            ]}"#,
        );
        assert!(matches!(
            AlignmentDataset::from_raw(&raw),
            Err(AlignError::MalformedDataset(_))
        ));
    }

    #[test]
    fn missing_resource_tables_are_malformed() {
        let synset = doc(r#"{"indices": [[], []], "alignments": [{"type": "synset", "data": []}]}"#);
        assert!(AlignmentDataset::from_raw(&synset).is_err());

        let muse = doc(
            r#"{"indices": [[], []], "alignments": [{"type": "lu_muse", "data": []}],
                "resources": {"embeddingNeighbors": {}}}"#,
        );
        assert!(AlignmentDataset::from_raw(&muse).is_err());
    }
}
