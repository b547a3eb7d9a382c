//! Intermediate resource tables: relations and synset metadata.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::dataset::document::RawResources;
use crate::dataset::relation::{
    IntermediateRelation, RankedRelation, Relation, SynsetMembership,
};
use crate::types::MethodType;

/// Definition and lemmas of one intermediate resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntermediateInfo {
    /// Gloss.
    pub definition: String,
    /// Language code -> lemmas.
    pub lemmas: BTreeMap<String, Vec<String>>,
}

/// Resource index built once per dataset.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    intermediate: Option<Relation>,
    neighbors: Option<RankedRelation>,
    metadata: HashMap<String, IntermediateInfo>,
}

impl ResourceIndex {
    /// Build lookup tables from the raw resource section.
    ///
    /// Neighbour ids missing from the vocabulary are dropped.
    pub fn new(raw: &RawResources) -> Self {
        let intermediate = raw.intermediate_relation.as_ref().map(|table| {
            let scored = table.values().flatten().any(|r| r.score().is_some());
            if scored {
                let ranked = table
                    .iter()
                    .map(|(lu, related)| {
                        let entries = related
                            .iter()
                            .map(|r| (r.id().to_string(), r.score().unwrap_or(1.0)))
                            .collect();
                        (lu.clone(), dedup_ranked(entries))
                    })
                    .collect();
                Relation::Ranked(RankedRelation::new(ranked))
            } else {
                let members = table
                    .iter()
                    .map(|(lu, related)| {
                        let mut ids: Vec<String> = Vec::with_capacity(related.len());
                        for r in related {
                            if !ids.iter().any(|i| i == r.id()) {
                                ids.push(r.id().to_string());
                            }
                        }
                        (lu.clone(), ids)
                    })
                    .collect();
                Relation::Membership(SynsetMembership::new(members))
            }
        });

        let neighbors = match (&raw.embedding_neighbors, &raw.embedding_vocabulary) {
            (Some(table), Some(vocab)) => {
                let mut ranked = HashMap::with_capacity(table.len());
                for (lu, list) in table {
                    let mut entries = Vec::with_capacity(list.len());
                    for neighbor in list {
                        match vocab.get(&neighbor.0) {
                            Some(token) => entries.push((token.clone(), neighbor.1)),
                            None => tracing::debug!(
                                lu = %lu,
                                vocab_id = %neighbor.0,
                                "unresolved embedding vocabulary id, skipping"
                            ),
                        }
                    }
                    ranked.insert(lu.clone(), dedup_ranked(entries));
                }
                Some(RankedRelation::new(ranked))
            }
            _ => None,
        };

        let metadata = raw
            .intermediate_metadata
            .iter()
            .map(|(id, info)| {
                (
                    id.clone(),
                    IntermediateInfo {
                        definition: info.definition.clone(),
                        lemmas: info.lemmas.clone(),
                    },
                )
            })
            .collect();

        Self {
            intermediate,
            neighbors,
            metadata,
        }
    }

    /// The relation a method type explains pairs through, if loaded.
    pub fn relation_for(&self, method_type: MethodType) -> Option<&dyn IntermediateRelation> {
        match method_type {
            MethodType::WordnetProjection
            | MethodType::SynsetForward
            | MethodType::SynsetInverse => self
                .intermediate
                .as_ref()
                .map(|r| r as &dyn IntermediateRelation),
            MethodType::EmbeddingNeighbor => self
                .neighbors
                .as_ref()
                .map(|r| r as &dyn IntermediateRelation),
            MethodType::AttributeMatching | MethodType::Unrecognized => None,
        }
    }

    /// Metadata of an intermediate id.
    pub fn info(&self, id: &str) -> Option<&IntermediateInfo> {
        self.metadata.get(id)
    }
}

/// Keep the first (highest ranked) occurrence of each id.
fn dedup_ranked(entries: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = Vec::with_capacity(entries.len());
    for (id, score) in entries {
        if !out.iter().any(|(seen, _)| *seen == id) {
            out.push((id, score));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignConfig;
    use crate::dataset::document::RawDataset;

    fn resources(json: &str) -> ResourceIndex {
        let doc = RawDataset::from_json(json).unwrap();
        ResourceIndex::new(&doc.resources)
    }

    #[test]
    fn neighbours_resolve_through_vocabulary() {
        let index = resources(
            r#"{"indices": [[], []], "alignments": [], "resources": {
                "embeddingVocabulary": {"1": "correr", "2": "andar"},
                "embeddingNeighbors": {"run.v": [[1, 0.9], [99, 0.8], [2, 0.7]]}
            }}"#,
        );
        let params = AlignConfig::default().embedding_neighbor;
        let rel = index.relation_for(MethodType::EmbeddingNeighbor).unwrap();
        assert_eq!(rel.related("run.v", &params), vec!["correr", "andar"]);
        assert!(index.relation_for(MethodType::SynsetForward).is_none());
    }

    #[test]
    fn scored_intermediate_table_is_ranked() {
        let index = resources(
            r#"{"indices": [[], []], "alignments": [], "resources": {
                "intermediateRelation": {"run.v": [["s1", 0.8], ["s2", 0.05], "s3"]},
                "intermediateMetadata": {"s1": {"definition": "move fast", "lemmas": {"eng": ["run"]}}}
            }}"#,
        );
        let params = AlignConfig::default().synset_forward;
        let rel = index.relation_for(MethodType::SynsetForward).unwrap();
        // s3 carries no score and counts as a full match.
        assert_eq!(rel.related("run.v", &params), vec!["s1", "s3"]);
        assert_eq!(index.info("s1").unwrap().lemmas["eng"], vec!["run"]);
        assert!(index.relation_for(MethodType::AttributeMatching).is_none());
    }

    #[test]
    fn duplicate_members_collapse() {
        let index = resources(
            r#"{"indices": [[], []], "alignments": [], "resources": {
                "intermediateRelation": {"run.v": ["s1", "s1", "s2"]}
            }}"#,
        );
        let params = AlignConfig::default().synset_forward;
        let rel = index.relation_for(MethodType::SynsetInverse).unwrap();
        assert_eq!(rel.related("run.v", &params), vec!["s1", "s2"]);
    }
}
