//! Selection options offered to a front end.

use serde::Serialize;

use crate::dataset::AlignmentDataset;
use crate::types::{FrameId, MethodId};

/// One entry of the frame picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOption {
    /// Frame id.
    pub id: FrameId,
    /// `"<name>.<language>"`.
    pub label: String,
    /// Frames without LUs cannot be explained.
    pub disabled: bool,
}

/// One entry of the scoring method picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodOption {
    /// Method id.
    pub id: MethodId,
    /// Description, or the id when there is none.
    pub label: String,
}

/// Frames of both inventories, sorted by id.
pub fn frame_options(dataset: &AlignmentDataset) -> Vec<FrameOption> {
    let frames = dataset.frames();
    let mut ids: Vec<&FrameId> = frames.inventory(0).iter().chain(frames.inventory(1)).collect();
    ids.sort();
    ids.dedup();

    ids.into_iter()
        .filter_map(|id| match frames.resolve(id) {
            Ok(frame) => Some(FrameOption {
                id: id.clone(),
                label: frame.label(),
                disabled: frame.lus.is_empty(),
            }),
            Err(err) => {
                tracing::debug!(%err, "frame option skipped");
                None
            }
        })
        .collect()
}

/// Methods in dataset order.
pub fn method_options(dataset: &AlignmentDataset) -> Vec<MethodOption> {
    dataset
        .methods()
        .iter()
        .map(|m| MethodOption {
            id: m.id.clone(),
            label: if m.description.is_empty() {
                m.id.to_string()
            } else {
                m.description.clone()
            },
        })
        .collect()
}
