//! Common core types used across the alignment engine.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Global frame identifier, unique across both inventories.
///
/// Dataset documents carry ids either as strings or as integers; both
/// deserialize into the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FrameId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

/// Deserialize an id written either as a JSON string or an integer.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

impl<'de> Deserialize<'de> for FrameId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_id(deserializer).map(FrameId)
    }
}

impl FrameId {
    /// Borrow the textual id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FrameId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of one alignment method inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(pub String);

impl MethodId {
    /// Borrow the textual id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MethodId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Scoring method type. Governs default parameters and how detail graphs
/// are oriented and classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodType {
    /// Frame attribute matching. Has no detail graph.
    #[serde(rename = "attribute_matching")]
    AttributeMatching,
    /// LU projection through WordNet synsets.
    #[serde(rename = "lu_wordnet", alias = "wordnet_projection")]
    WordnetProjection,
    /// Synset overlap, frame 1 as reference.
    #[serde(rename = "synset", alias = "synset_forward")]
    SynsetForward,
    /// Synset overlap, frame 2 as reference.
    #[serde(rename = "synset_inv", alias = "synset_inverse")]
    SynsetInverse,
    /// LU projection through embedding nearest neighbours.
    #[serde(rename = "lu_muse", alias = "embedding_neighbor")]
    EmbeddingNeighbor,
    /// Any type this build does not know about.
    #[serde(other, rename = "unrecognized")]
    Unrecognized,
}

impl MethodType {
    /// Every variant, in declaration order.
    pub const ALL: [MethodType; 6] = [
        MethodType::AttributeMatching,
        MethodType::WordnetProjection,
        MethodType::SynsetForward,
        MethodType::SynsetInverse,
        MethodType::EmbeddingNeighbor,
        MethodType::Unrecognized,
    ];

    /// Forward-projection types reorient links into frame1 -> frame2 flow.
    pub fn is_projection(self) -> bool {
        matches!(self, MethodType::WordnetProjection | MethodType::EmbeddingNeighbor)
    }

    /// Whether a frame pair can be explained with a detail graph.
    pub fn is_detail_capable(self) -> bool {
        matches!(
            self,
            MethodType::WordnetProjection
                | MethodType::SynsetForward
                | MethodType::SynsetInverse
                | MethodType::EmbeddingNeighbor
        )
    }
}

/// Column a detail node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeSide {
    /// An LU of the first frame of the pair.
    #[serde(rename = "frm1LU")]
    Frame1Lu,
    /// A shared synset or neighbour token.
    #[serde(rename = "intermediate")]
    Intermediate,
    /// An LU of the second frame of the pair.
    #[serde(rename = "frm2LU")]
    Frame2Lu,
}

impl NodeSide {
    /// True for either LU column.
    pub fn is_lu(self) -> bool {
        !matches!(self, NodeSide::Intermediate)
    }
}
