//! LU -> intermediate resource relations.
//!
//! Two forms exist: unscored synset membership and ranked, scored
//! neighbour lists. Both answer the same question for the detail graph
//! builder: which intermediate ids does this LU reach under the active
//! parameters.

use std::collections::HashMap;

use crate::config::MethodParams;

/// Lookup of the intermediate ids an LU relates to.
pub trait IntermediateRelation {
    /// Related intermediate ids for `lu`, in relation order, after the
    /// threshold / cap rules of this relation form.
    fn related(&self, lu: &str, params: &MethodParams) -> Vec<String>;
}

/// Unscored relation: every listed id is always related.
#[derive(Debug, Clone, Default)]
pub struct SynsetMembership {
    members: HashMap<String, Vec<String>>,
}

impl SynsetMembership {
    /// Build from LU -> ids pairs.
    pub fn new(members: HashMap<String, Vec<String>>) -> Self {
        Self { members }
    }
}

impl IntermediateRelation for SynsetMembership {
    fn related(&self, lu: &str, _params: &MethodParams) -> Vec<String> {
        self.members.get(lu).cloned().unwrap_or_default()
    }
}

/// Scored relation, ranked by descending similarity as delivered.
#[derive(Debug, Clone, Default)]
pub struct RankedRelation {
    ranked: HashMap<String, Vec<(String, f64)>>,
}

impl RankedRelation {
    /// Build from LU -> `(id, score)` lists. Lists are kept in the given
    /// order, which is assumed to be descending by score.
    pub fn new(ranked: HashMap<String, Vec<(String, f64)>>) -> Self {
        Self { ranked }
    }
}

impl IntermediateRelation for RankedRelation {
    fn related(&self, lu: &str, params: &MethodParams) -> Vec<String> {
        let Some(entries) = self.ranked.get(lu) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|(_, score)| *score >= params.threshold)
            .take(params.top_k.unwrap_or(usize::MAX))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Either relation form, as loaded from the document.
#[derive(Debug, Clone)]
pub enum Relation {
    /// Bare ids.
    Membership(SynsetMembership),
    /// Scored, ranked ids.
    Ranked(RankedRelation),
}

impl IntermediateRelation for Relation {
    fn related(&self, lu: &str, params: &MethodParams) -> Vec<String> {
        match self {
            Relation::Membership(m) => m.related(lu, params),
            Relation::Ranked(r) => r.related(lu, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(threshold: f64, top_k: Option<usize>) -> MethodParams {
        MethodParams {
            threshold,
            top_k,
            limit_edges: false,
            filter_to_selected_frames: false,
        }
    }

    #[test]
    fn membership_ignores_threshold_and_cap() {
        let mut m = HashMap::new();
        m.insert("run.v".to_string(), vec!["a".to_string(), "b".to_string()]);
        let rel = SynsetMembership::new(m);
        assert_eq!(rel.related("run.v", &params(0.9, Some(1))), vec!["a", "b"]);
        assert!(rel.related("walk.v", &params(0.0, None)).is_empty());
    }

    #[test]
    fn ranked_filters_then_caps() {
        let mut r = HashMap::new();
        r.insert(
            "run.v".to_string(),
            vec![
                ("correr".to_string(), 0.9),
                ("andar".to_string(), 0.6),
                ("saltar".to_string(), 0.2),
            ],
        );
        let rel = RankedRelation::new(r);
        assert_eq!(rel.related("run.v", &params(0.5, None)), vec!["correr", "andar"]);
        assert_eq!(rel.related("run.v", &params(0.0, Some(1))), vec!["correr"]);
        assert!(rel.related("run.v", &params(0.0, Some(0))).is_empty());
    }
}
