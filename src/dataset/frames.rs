//! Frame index: metadata lookups built once per dataset.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::dataset::document::RawFrame;
use crate::errors::{AlignError, Result};
use crate::types::FrameId;

/// A frame of one inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Global id.
    pub id: FrameId,
    /// Frame name.
    pub name: String,
    /// Language code.
    pub language: String,
    /// Lexical unit names, in document order.
    pub lus: Vec<String>,
}

impl Frame {
    /// Display label used by the flow diagram: `"<name>.<language>"`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.name, self.language)
    }
}

/// Immutable frame lookup tables.
#[derive(Debug, Clone, Default)]
pub struct FrameIndex {
    frames: BTreeMap<FrameId, Frame>,
    by_label: HashMap<String, FrameId>,
    inventories: [Vec<FrameId>; 2],
}

impl FrameIndex {
    /// Build the index from the document's frame table and id arrays.
    pub fn new(raw: &BTreeMap<FrameId, RawFrame>, inventories: [Vec<FrameId>; 2]) -> Self {
        let mut frames = BTreeMap::new();
        let mut by_label = HashMap::with_capacity(raw.len());

        for (id, f) in raw {
            let frame = Frame {
                id: id.clone(),
                name: f.name.clone(),
                language: f.language.clone(),
                lus: f.lus.clone(),
            };
            by_label.entry(frame.label()).or_insert_with(|| id.clone());
            frames.insert(id.clone(), frame);
        }

        Self {
            frames,
            by_label,
            inventories,
        }
    }

    /// Frame by id, if present.
    pub fn get(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.get(id)
    }

    /// Frame by id, or `UnresolvedFrameReference`.
    pub fn resolve(&self, id: &FrameId) -> Result<&Frame> {
        self.frames
            .get(id)
            .ok_or_else(|| AlignError::UnresolvedFrameReference(format!("frame {id}")))
    }

    /// Reverse lookup from a flow-diagram label.
    pub fn by_label(&self, label: &str) -> Option<&Frame> {
        self.by_label.get(label).and_then(|id| self.frames.get(id))
    }

    /// Ordered ids of inventory 0 or 1.
    pub fn inventory(&self, side: usize) -> &[FrameId] {
        self.inventories.get(side).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Frames in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    /// Number of frames with metadata.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frame metadata was loaded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, lang: &str, lus: &[&str]) -> RawFrame {
        RawFrame {
            name: name.into(),
            language: lang.into(),
            lus: lus.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn resolves_by_id_and_label() {
        let mut table = BTreeMap::new();
        table.insert(FrameId::from("f1"), raw("Motion", "en", &["run.v"]));
        let index = FrameIndex::new(&table, [vec![FrameId::from("f1")], vec![]]);

        assert_eq!(index.resolve(&FrameId::from("f1")).unwrap().label(), "Motion.en");
        assert_eq!(index.by_label("Motion.en").unwrap().id, FrameId::from("f1"));
        assert!(matches!(
            index.resolve(&FrameId::from("nope")),
            Err(AlignError::UnresolvedFrameReference(_))
        ));
        assert_eq!(index.inventory(0).len(), 1);
        assert!(index.inventory(7).is_empty());
    }
}
