//! Session facade: installed dataset, selections and change events.
//!
//! Every query here is a plain function of the current session state. Front
//! ends that want to react to changes subscribe to [`SessionEvent`]s instead
//! of observing fields.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::{AlignConfig, MethodParams, ParamUpdate};
use crate::dataset::{AlignmentDataset, AlignmentMethod, RawDataset};
use crate::errors::{AlignError, Result};
use crate::graph::{DetailGraph, DetailGraphBuilder, DetailSummary, FlowEdge, FlowViewBuilder};
use crate::options::{self, FrameOption, MethodOption};
use crate::scoring::ScoringConfig;
use crate::types::{FrameId, MethodId};

/// What changed in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new dataset replaced the previous one.
    DatasetChanged,
    /// Another method became active.
    MethodChanged(MethodId),
    /// The active method's parameters changed.
    ParamsChanged(MethodId),
    /// Selected frames or the selected pair changed.
    SelectionChanged,
}

type Listener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// One user's view over a dataset.
pub struct AlignmentSession {
    dataset: Option<Arc<AlignmentDataset>>,
    scoring: ScoringConfig,
    selected_frames: BTreeSet<FrameId>,
    selected_pair: Option<(FrameId, FrameId)>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for AlignmentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignmentSession")
            .field("dataset_loaded", &self.dataset.is_some())
            .field("scoring", &self.scoring)
            .field("selected_frames", &self.selected_frames)
            .field("selected_pair", &self.selected_pair)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for AlignmentSession {
    fn default() -> Self {
        Self::new(AlignConfig::default())
    }
}

impl AlignmentSession {
    /// Empty session using `config` for method defaults.
    pub fn new(config: AlignConfig) -> Self {
        Self {
            dataset: None,
            scoring: ScoringConfig::new(config),
            selected_frames: BTreeSet::new(),
            selected_pair: None,
            listeners: Vec::new(),
        }
    }

    /// Register a callback for every subsequent event.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: SessionEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Build and install a dataset.
    ///
    /// If building fails the session is left exactly as it was. Otherwise
    /// selections and customizations are reset and the first method becomes
    /// active.
    pub fn load(&mut self, raw: &RawDataset) -> Result<()> {
        let dataset = AlignmentDataset::from_raw(raw)?;
        self.install(Arc::new(dataset));
        Ok(())
    }

    /// Install an already built dataset.
    pub fn install(&mut self, dataset: Arc<AlignmentDataset>) {
        self.scoring.reset();
        self.selected_frames.clear();
        self.selected_pair = None;
        if let Some(first) = dataset.methods().first() {
            self.scoring.activate(first);
        }
        self.dataset = Some(dataset);
        self.emit(SessionEvent::DatasetChanged);
    }

    /// The installed dataset.
    pub fn dataset(&self) -> Option<&Arc<AlignmentDataset>> {
        self.dataset.as_ref()
    }

    /// The active method.
    pub fn active_method(&self) -> Option<&AlignmentMethod> {
        let dataset = self.dataset.as_deref()?;
        dataset.method(self.scoring.active()?)
    }

    /// Parameters of the active method.
    pub fn params(&self) -> Option<MethodParams> {
        self.active_method().map(|m| self.scoring.params(m))
    }

    /// Make another method active.
    pub fn select_method(&mut self, id: &MethodId) -> Result<()> {
        let method = self
            .dataset
            .as_deref()
            .and_then(|d| d.method(id))
            .ok_or_else(|| AlignError::UnknownMethod(id.clone()))?;
        self.scoring.activate(method);
        self.emit(SessionEvent::MethodChanged(id.clone()));
        Ok(())
    }

    /// Change the active method's parameters.
    pub fn update_params(&mut self, update: &ParamUpdate) -> Result<MethodParams> {
        let method = self
            .dataset
            .as_deref()
            .and_then(|d| d.method(self.scoring.active()?))
            .ok_or_else(|| AlignError::InvalidParameterValue {
                name: "method",
                detail: "no active alignment method".into(),
            })?;
        let params = self.scoring.customize(method, update)?;
        let id = method.id.clone();
        self.emit(SessionEvent::ParamsChanged(id));
        Ok(params)
    }

    /// Replace the set of frames shown in the flow diagram.
    pub fn select_frames<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = FrameId>,
    {
        self.selected_frames = ids.into_iter().collect();
        self.emit(SessionEvent::SelectionChanged);
    }

    /// Frames shown in the flow diagram.
    pub fn selected_frames(&self) -> &BTreeSet<FrameId> {
        &self.selected_frames
    }

    /// Select the pair to explain. No-op returning `false` when the active
    /// method has no detail view.
    pub fn select_pair(&mut self, source: FrameId, target: FrameId) -> bool {
        let capable = self
            .active_method()
            .map_or(false, |m| m.method_type.is_detail_capable());
        if !capable {
            return false;
        }
        self.selected_pair = Some((source, target));
        self.emit(SessionEvent::SelectionChanged);
        true
    }

    /// Drop the selected pair.
    pub fn clear_pair(&mut self) {
        if self.selected_pair.take().is_some() {
            self.emit(SessionEvent::SelectionChanged);
        }
    }

    /// The selected pair.
    pub fn selected_pair(&self) -> Option<(&FrameId, &FrameId)> {
        self.selected_pair.as_ref().map(|(s, t)| (s, t))
    }

    /// Flow-diagram edges for the current state.
    pub fn flow_edges(&self) -> Vec<FlowEdge> {
        let (Some(dataset), Some(method)) = (self.dataset.as_deref(), self.active_method()) else {
            return Vec::new();
        };
        let params = self.scoring.params(method);
        FlowViewBuilder::new(dataset).build(&method.id, &params, &self.selected_frames)
    }

    /// Detail graph of the selected pair, empty without one.
    pub fn detail_graph(&self) -> DetailGraph {
        let (Some(dataset), Some(method), Some((source, target))) = (
            self.dataset.as_deref(),
            self.active_method(),
            self.selected_pair.as_ref(),
        ) else {
            return DetailGraph::empty();
        };
        let params = self.scoring.params(method);
        DetailGraphBuilder::new(dataset).build(method, &params, source, target)
    }

    /// Score summary of [`Self::detail_graph`].
    pub fn detail_summary(&self) -> DetailSummary {
        DetailSummary::from_graph(&self.detail_graph())
    }

    /// Frame picker entries.
    pub fn frame_options(&self) -> Vec<FrameOption> {
        self.dataset
            .as_deref()
            .map(options::frame_options)
            .unwrap_or_default()
    }

    /// Method picker entries.
    pub fn method_options(&self) -> Vec<MethodOption> {
        self.dataset
            .as_deref()
            .map(options::method_options)
            .unwrap_or_default()
    }
}
