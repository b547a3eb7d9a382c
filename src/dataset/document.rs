//! Serde model of the alignment dataset document.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::types::{deserialize_id, FrameId, MethodId, MethodType};

/// The whole document as uploaded by a front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataset {
    /// Frame ids of each inventory, in matrix row / column order.
    pub indices: Vec<Vec<FrameId>>,
    /// One similarity matrix per alignment method.
    pub alignments: Vec<RawAlignment>,
    /// Frame metadata keyed by global id.
    #[serde(default)]
    pub frames: BTreeMap<FrameId, RawFrame>,
    /// Intermediate resources used by detail graphs.
    #[serde(default)]
    pub resources: RawResources,
}

impl RawDataset {
    /// Parse a document from a JSON string.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a document from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// One alignment method and its dense matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAlignment {
    /// Method id. Defaults to the position in the alignment list.
    #[serde(default)]
    pub id: Option<MethodId>,
    /// Scoring method type.
    #[serde(rename = "type")]
    pub method_type: MethodType,
    /// Human readable description.
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Rows follow `indices[0]`, columns follow `indices[1]`.
    #[serde(alias = "data")]
    pub matrix: Vec<Vec<f64>>,
}

/// Frame metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFrame {
    /// Frame name.
    pub name: String,
    /// Language code of the frame's inventory.
    pub language: String,
    /// Lexical unit names.
    #[serde(default, rename = "LUs", alias = "lus")]
    pub lus: Vec<String>,
}

/// Resource tables. Which are required depends on the alignment types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResources {
    /// LU name -> related intermediate ids, optionally scored.
    #[serde(default)]
    pub intermediate_relation: Option<BTreeMap<String, Vec<RawRelated>>>,
    /// Intermediate id -> definition and lemmas.
    #[serde(default)]
    pub intermediate_metadata: BTreeMap<String, RawIntermediateInfo>,
    /// Embedding vocabulary id -> token.
    #[serde(default)]
    pub embedding_vocabulary: Option<HashMap<String, String>>,
    /// LU name -> ranked neighbour list.
    #[serde(default)]
    pub embedding_neighbors: Option<BTreeMap<String, Vec<RawNeighbor>>>,
}

/// A related intermediate id, bare or with a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRelated {
    /// `"syn1"`
    Id(String),
    /// `["syn1", 0.8]`
    Scored(String, f64),
}

impl RawRelated {
    /// The intermediate id.
    pub fn id(&self) -> &str {
        match self {
            RawRelated::Id(id) | RawRelated::Scored(id, _) => id,
        }
    }

    /// The score, if any.
    pub fn score(&self) -> Option<f64> {
        match self {
            RawRelated::Id(_) => None,
            RawRelated::Scored(_, s) => Some(*s),
        }
    }
}

/// `[vocabularyId, similarity]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNeighbor(#[serde(deserialize_with = "deserialize_id")] pub String, pub f64);

/// Metadata of an intermediate resource (synset).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIntermediateInfo {
    /// Gloss / definition.
    #[serde(default)]
    pub definition: String,
    /// Language code -> lemmas.
    #[serde(default)]
    pub lemmas: BTreeMap<String, Vec<String>>,
}
