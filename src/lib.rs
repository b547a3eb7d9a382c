#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, rust_2018_idioms)]
#![warn(missing_docs)]

//! # framealign
//!
//! Graph construction and scoring for multilingual frame alignments:
//! - dense similarity matrices turned into sparse, filterable edge lists
//! - per-frame top-k pruning for the flow (bipartite) view
//! - three-tier LU / intermediate / LU detail graphs with matching flags
//!
//! Every query is a deterministic function of a loaded dataset and a set of
//! parameters.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod graph;
/// Selection options for front ends.
pub mod options;
pub mod scoring;
/// Session facade with change events.
pub mod session;
pub mod types;

pub use config::{AlignConfig, MethodParams, ParamUpdate};
pub use dataset::{AlignmentDataset, AlignmentMethod, RawDataset};
pub use errors::{AlignError, Result};
pub use graph::{DetailGraph, DetailGraphBuilder, DetailSummary, FlowEdge, FlowViewBuilder};
pub use scoring::ScoringConfig;
pub use session::{AlignmentSession, SessionEvent};
pub use types::{FrameId, MethodId, MethodType, NodeSide};
