//! Authored edges - the wiring between nodes that drives in-game events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, Result};
use crate::lenient;
use crate::nodes::NodeId;

/// Which detection path an edge listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// Fires on collision and on proximity.
    #[default]
    Default,
    /// Fires on proximity activations.
    Trigger,
    /// Fires on collisions.
    Collision,
    /// Offered by the editor; never matched by the event executor.
    Pickup,
    #[serde(other)]
    Unknown,
}

/// What an edge does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionEffect {
    Damage,
    Heal,
    Teleport,
    Activate,
    Destroy,
    #[default]
    #[serde(other)]
    None,
}

/// Typed view of an edge's property record. Mistyped fields read as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeProperties {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional")]
    pub connection_type: Option<ConnectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional")]
    pub effect: Option<ConnectionEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional")]
    pub value: Option<f64>,
}

impl EdgeProperties {
    pub fn new(connection_type: ConnectionType, effect: ConnectionEffect) -> Self {
        Self {
            connection_type: Some(connection_type),
            effect: Some(effect),
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeData {
    /// Raw property record, decoded when the graph is compiled so a bad field
    /// never rejects the whole payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// An edge as authored in the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl Edge {
    /// Create an edge without a property record.
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data: None,
        }
    }

    /// Attach a property record. Accepts [`EdgeProperties`] as well as raw JSON.
    pub fn with_properties(mut self, properties: impl Serialize) -> Self {
        self.data = Some(EdgeData {
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

    /// Decode the property record. Returns `Ok(None)` when there is none.
    pub fn decode_properties(&self) -> Result<Option<EdgeProperties>> {
        match self.properties() {
            None => Ok(None),
            Some(raw) => EdgeProperties::deserialize(raw)
                .map(Some)
                .map_err(|source| GraphError::EdgeProperties {
                    edge: self.id.clone(),
                    source,
                }),
        }
    }

    /// Whether the edge touches the given node at either end.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}
