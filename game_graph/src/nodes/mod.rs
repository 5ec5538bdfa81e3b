//! Authored nodes - the entities placed on the editor canvas.

mod properties;

pub use properties::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, Result};

/// Identifier assigned to a node by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Player,
    Enemy,
    Terrain,
    Item,
    Trigger,
    /// Any type string the editor sent that this crate does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Player => "player",
            NodeType::Enemy => "enemy",
            NodeType::Terrain => "terrain",
            NodeType::Item => "item",
            NodeType::Trigger => "trigger",
            NodeType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Payload attached to a node by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NodeData {
    /// Raw property record. Its shape depends on the node type, so decoding is
    /// deferred until the type is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// A node as authored in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NodeData>,
}

impl Node {
    /// Create a node without a property record.
    pub fn new(id: impl Into<NodeId>, node_type: NodeType, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            node_type,
            position: Position::new(x, y),
            data: None,
        }
    }

    /// Attach a property record. Accepts typed records as well as raw JSON.
    pub fn with_properties(mut self, properties: impl Serialize) -> Self {
        self.data = Some(NodeData {
            properties: serde_json::to_value(properties).ok(),
        });
        self
    }

    /// The raw property record, if the editor supplied one.
    pub fn properties(&self) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.properties.as_ref())
    }

    pub fn has_properties(&self) -> bool {
        self.properties().is_some()
    }

    /// Decode the property record into a typed record.
    ///
    /// Returns `Ok(None)` when the node carries no record at all.
    pub fn decode_properties<P: DeserializeOwned>(&self) -> Result<Option<P>> {
        match self.properties() {
            None => Ok(None),
            Some(raw) => P::deserialize(raw)
                .map(Some)
                .map_err(|source| GraphError::Properties {
                    node: self.id.clone(),
                    node_type: self.node_type,
                    source,
                }),
        }
    }
}
