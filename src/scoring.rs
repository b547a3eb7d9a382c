//! Active scoring method selection and per-session parameter overrides.

use std::collections::HashMap;

use crate::config::{AlignConfig, MethodParams, ParamUpdate};
use crate::dataset::AlignmentMethod;
use crate::errors::Result;
use crate::types::MethodId;

/// Which method is active and what the user changed for each method.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    defaults: AlignConfig,
    active: Option<MethodId>,
    customized: HashMap<MethodId, MethodParams>,
}

impl ScoringConfig {
    /// Start with no active method and the given default table.
    pub fn new(defaults: AlignConfig) -> Self {
        Self {
            defaults,
            active: None,
            customized: HashMap::new(),
        }
    }

    /// The default table.
    pub fn defaults(&self) -> &AlignConfig {
        &self.defaults
    }

    /// Id of the active method.
    pub fn active(&self) -> Option<&MethodId> {
        self.active.as_ref()
    }

    /// Make `method` active. Earlier customizations of it are kept.
    pub fn activate(&mut self, method: &AlignmentMethod) {
        tracing::info!(method = %method.id, kind = ?method.method_type, "scoring method selected");
        self.active = Some(method.id.clone());
    }

    /// Parameters in effect for `method`: the user's, else the type default.
    pub fn params(&self, method: &AlignmentMethod) -> MethodParams {
        self.customized
            .get(&method.id)
            .cloned()
            .unwrap_or_else(|| self.defaults.defaults_for(method.method_type).clone())
    }

    /// Apply a user update to `method`'s parameters.
    ///
    /// On error nothing is stored.
    pub fn customize(&mut self, method: &AlignmentMethod, update: &ParamUpdate) -> Result<MethodParams> {
        let next = self.params(method).apply(update)?;
        self.customized.insert(method.id.clone(), next.clone());
        Ok(next)
    }

    /// Forget the active method and every customization.
    pub fn reset(&mut self) {
        self.active = None;
        self.customized.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MethodType;

    fn method(id: &str, t: MethodType) -> AlignmentMethod {
        AlignmentMethod {
            id: id.into(),
            method_type: t,
            description: String::new(),
        }
    }

    #[test]
    fn falls_back_to_type_defaults() {
        let scoring = ScoringConfig::default();
        let m = method("nn", MethodType::EmbeddingNeighbor);
        assert_eq!(scoring.params(&m), AlignConfig::default().embedding_neighbor);
    }

    #[test]
    fn customizations_survive_switching() {
        let mut scoring = ScoringConfig::default();
        let a = method("a", MethodType::SynsetForward);
        let b = method("b", MethodType::SynsetInverse);

        scoring.activate(&a);
        scoring
            .customize(&a, &ParamUpdate::default().threshold(0.6))
            .unwrap();
        scoring.activate(&b);
        assert_eq!(scoring.params(&b).threshold, 0.1);
        scoring.activate(&a);
        assert_eq!(scoring.params(&a).threshold, 0.6);
        assert_eq!(scoring.active(), Some(&MethodId::from("a")));

        scoring.reset();
        assert!(scoring.active().is_none());
        assert_eq!(scoring.params(&a).threshold, 0.1);
    }

    #[test]
    fn failed_update_stores_nothing() {
        let mut scoring = ScoringConfig::default();
        let a = method("a", MethodType::SynsetForward);
        assert!(scoring
            .customize(&a, &ParamUpdate::default().threshold(f64::INFINITY))
            .is_err());
        assert_eq!(scoring.params(&a), AlignConfig::default().synset_forward);
    }
}
