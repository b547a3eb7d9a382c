//! Scoring parameters and the per-type default table.

use serde::{Deserialize, Serialize};

use crate::errors::{AlignError, Result};
use crate::types::MethodType;

/// Parameters governing one alignment method's views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParams {
    /// Minimum edge score / neighbour similarity kept, in `[0, 1]`.
    pub threshold: f64,
    /// Per-source edge cap and neighbour list cap. `None` is uncapped.
    pub top_k: Option<usize>,
    /// Whether flow edges are pruned to `top_k` per source frame.
    pub limit_edges: bool,
    /// Intersection mode: both endpoints must be selected.
    pub filter_to_selected_frames: bool,
}

impl MethodParams {
    const fn new(threshold: f64, top_k: Option<usize>) -> Self {
        Self {
            threshold,
            top_k,
            limit_edges: false,
            filter_to_selected_frames: false,
        }
    }

    /// Apply a user update, returning the resulting parameter set.
    ///
    /// Finite thresholds are clamped into `[0, 1]` and negative `top_k`
    /// values to 0. A non-finite threshold is rejected and nothing changes.
    pub fn apply(&self, update: &ParamUpdate) -> Result<MethodParams> {
        let mut next = self.clone();

        if let Some(threshold) = update.threshold {
            next.threshold = clamp_threshold(threshold)?;
        }
        if let Some(top_k) = update.top_k {
            next.top_k = top_k.map(clamp_top_k);
        }
        if let Some(limit) = update.limit_edges {
            next.limit_edges = limit;
        }
        if let Some(filter) = update.filter_to_selected_frames {
            next.filter_to_selected_frames = filter;
        }

        Ok(next)
    }

    /// The pruning cap in effect, if `limit_edges` is set and a cap exists.
    pub fn edge_limit(&self) -> Option<usize> {
        if self.limit_edges {
            self.top_k
        } else {
            None
        }
    }
}

/// A partial change to [`MethodParams`]. `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamUpdate {
    /// New threshold.
    pub threshold: Option<f64>,
    /// New cap; `Some(None)` clears it. Signed so that raw user input can be
    /// passed through and clamped.
    pub top_k: Option<Option<i64>>,
    /// New pruning flag.
    pub limit_edges: Option<bool>,
    /// New selection mode.
    pub filter_to_selected_frames: Option<bool>,
}

impl ParamUpdate {
    /// Set the threshold.
    pub fn threshold(mut self, value: f64) -> Self {
        self.threshold = Some(value);
        self
    }

    /// Set or clear the cap.
    pub fn top_k(mut self, value: Option<i64>) -> Self {
        self.top_k = Some(value);
        self
    }

    /// Set the pruning flag.
    pub fn limit_edges(mut self, value: bool) -> Self {
        self.limit_edges = Some(value);
        self
    }

    /// Set the selection mode.
    pub fn filter_to_selected_frames(mut self, value: bool) -> Self {
        self.filter_to_selected_frames = Some(value);
        self
    }
}

fn clamp_threshold(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(AlignError::InvalidParameterValue {
            name: "threshold",
            detail: format!("{value} is not a finite number"),
        });
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::warn!(value, clamped, "threshold out of [0, 1], clamping");
    }
    Ok(clamped)
}

fn clamp_top_k(value: i64) -> usize {
    if value < 0 {
        tracing::warn!(value, "negative top_k, clamping to 0");
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

/// Global configuration: default parameters per method type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignConfig {
    /// Defaults for attribute matching.
    pub attribute_matching: MethodParams,
    /// Defaults for WordNet projection.
    pub wordnet_projection: MethodParams,
    /// Defaults for forward synset overlap.
    pub synset_forward: MethodParams,
    /// Defaults for inverse synset overlap.
    pub synset_inverse: MethodParams,
    /// Defaults for embedding neighbour projection.
    pub embedding_neighbor: MethodParams,
    /// Defaults for types this build does not recognise.
    pub fallback: MethodParams,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            attribute_matching: MethodParams::new(0.1, None),
            wordnet_projection: MethodParams::new(0.1, Some(10)),
            synset_forward: MethodParams::new(0.1, None),
            synset_inverse: MethodParams::new(0.1, None),
            embedding_neighbor: MethodParams::new(0.1, Some(10)),
            fallback: MethodParams::new(0.1, None),
        }
    }
}

impl AlignConfig {
    /// Default parameter record for a method type.
    pub fn defaults_for(&self, method_type: MethodType) -> &MethodParams {
        match method_type {
            MethodType::AttributeMatching => &self.attribute_matching,
            MethodType::WordnetProjection => &self.wordnet_projection,
            MethodType::SynsetForward => &self.synset_forward,
            MethodType::SynsetInverse => &self.synset_inverse,
            MethodType::EmbeddingNeighbor => &self.embedding_neighbor,
            MethodType::Unrecognized => &self.fallback,
        }
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
