//! Flow-level edges between frames.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::types::FrameId;

/// A sparse alignment edge `(source, target, score)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentEdge {
    /// Frame of inventory 0.
    pub source: FrameId,
    /// Frame of inventory 1.
    pub target: FrameId,
    /// Similarity score in `(0, 1]`.
    pub score: f64,
}

impl AlignmentEdge {
    /// Create a new edge.
    pub fn new(source: FrameId, target: FrameId, score: f64) -> Self {
        Self {
            source,
            target,
            score,
        }
    }
}

/// An edge ready for a flow-diagram renderer.
///
/// Serializes as `[sourceLabel, targetLabel, score]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    /// `"<name>.<language>"` of the source frame.
    pub source_label: String,
    /// `"<name>.<language>"` of the target frame.
    pub target_label: String,
    /// Alignment score.
    pub score: f64,
    /// Source frame id, kept for selecting a pair on click.
    pub source: FrameId,
    /// Target frame id.
    pub target: FrameId,
}

impl Serialize for FlowEdge {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.source_label)?;
        tup.serialize_element(&self.target_label)?;
        tup.serialize_element(&self.score)?;
        tup.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_edge_serializes_as_triple() {
        let edge = FlowEdge {
            source_label: "Motion.en".into(),
            target_label: "Movimento.pt".into(),
            score: 0.5,
            source: FrameId::from("1"),
            target: FrameId::from("2"),
        };
        assert_eq!(
            serde_json::to_string(&edge).unwrap(),
            r#"["Motion.en","Movimento.pt",0.5]"#
        );
    }
}
