//! Alignment graphs: flow-diagram edges and three-tier detail graphs.

pub mod arena;
pub mod detail;
pub mod edge;
pub mod explain;
pub mod flow;
pub mod metrics;
pub mod node;
pub mod pruning;
/// Per-method-type detail strategies.
pub mod strategy;

pub use arena::{FramePair, TierArena};
pub use detail::{DetailGraph, DetailGraphBuilder};
pub use edge::{AlignmentEdge, FlowEdge};
pub use explain::{explain_intermediate, IntermediateExplanation};
pub use flow::FlowViewBuilder;
pub use metrics::DetailSummary;
pub use node::{DetailLink, DetailNode};
pub use pruning::EdgePruner;
pub use strategy::{strategy_for, DetailStrategy, ProjectionStrategy, SynsetStrategy};
