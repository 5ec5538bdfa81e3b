//! Errors raised while reading authored graph data.

use thiserror::Error;

use crate::nodes::{NodeId, NodeType};

/// Failures at the editor boundary. The simulation itself never sees these.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("malformed graph payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("properties of {node_type} node '{node}' do not match its type: {source}")]
    Properties {
        node: NodeId,
        node_type: NodeType,
        #[source]
        source: serde_json::Error,
    },

    #[error("properties of edge '{edge}' are not a record: {source}")]
    EdgeProperties {
        edge: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;
