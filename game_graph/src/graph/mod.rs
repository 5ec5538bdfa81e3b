//! The authored graph as a whole - what the editor hands to the simulation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::edges::Edge;
use crate::error::Result;
use crate::nodes::{Node, NodeId, NodeType};

/// Nodes and edges of one authored game.
///
/// The graph is read-only input for a run. Lookups return the first match in
/// authored order, which is how the simulation picks its single player and the
/// terrain that defines the world bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameGraph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GameGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Parse the editor's `{ "nodes": [...], "edges": [...] }` payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// The node treated as the player: the first of type player.
    pub fn player_node(&self) -> Option<&Node> {
        self.first_of_type(NodeType::Player)
    }

    /// The terrain node that defines world bounds: the first of type terrain.
    pub fn terrain_node(&self) -> Option<&Node> {
        self.first_of_type(NodeType::Terrain)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    /// Edges that touch a node at either end.
    pub fn edges_for(&self, id: &NodeId) -> impl Iterator<Item = &Edge> + '_ {
        let id = id.clone();
        self.edges.iter().filter(move |e| e.touches(&id))
    }

    fn first_of_type(&self, node_type: NodeType) -> Option<&Node> {
        self.nodes.iter().find(|n| n.node_type == node_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{ConnectionEffect, ConnectionType, EdgeProperties};
    use crate::error::GraphError;

    const EDITOR_PAYLOAD: &str = r#"{
        "nodes": [
            { "id": "t1", "type": "terrain", "position": { "x": 0, "y": 0 },
              "data": { "properties": { "width": 640, "height": 480, "worldBoundary": "wrap" } } },
            { "id": "p1", "type": "player", "position": { "x": 10, "y": 10 },
              "data": { "properties": { "health": 50 } } },
            { "id": "p2", "type": "player", "position": { "x": 90, "y": 90 },
              "data": { "properties": { "health": 75 } } },
            { "id": "t2", "type": "terrain", "position": { "x": 300, "y": 300 },
              "data": { "properties": {} } }
        ],
        "edges": [
            { "id": "e1", "source": "p1", "target": "t2",
              "data": { "properties": { "type": "collision", "effect": "heal" } } }
        ]
    }"#;

    #[test]
    fn test_parse_editor_payload() {
        let graph = GameGraph::from_json(EDITOR_PAYLOAD).unwrap();
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_first_player_and_terrain_win() {
        let graph = GameGraph::from_json(EDITOR_PAYLOAD).unwrap();
        assert_eq!(graph.player_node().unwrap().id, NodeId::from("p1"));
        assert_eq!(graph.terrain_node().unwrap().id, NodeId::from("t1"));
        assert_eq!(graph.nodes_of_type(NodeType::Terrain).count(), 2);
    }

    #[test]
    fn test_edges_for_node() {
        let graph = GameGraph::from_json(EDITOR_PAYLOAD).unwrap();
        assert_eq!(graph.edges_for(&NodeId::from("t2")).count(), 1);
        assert_eq!(graph.edges_for(&NodeId::from("t1")).count(), 0);
    }

    #[test]
    fn test_malformed_payload() {
        let err = GameGraph::from_json("{ \"nodes\": 3 }").unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn test_mistyped_fields_do_not_reject_payload() {
        let graph = GameGraph::from_json(
            r#"{
                "nodes": [
                    { "id": "e", "type": "enemy", "position": { "x": 0, "y": 0 },
                      "data": { "properties": { "damage": "lots" } } }
                ],
                "edges": [
                    { "id": "hit", "source": "e", "target": "e",
                      "data": { "properties": { "effect": "damage", "value": "25" } } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_empty_payload() {
        let graph = GameGraph::from_json("{}").unwrap();
        assert!(graph.player_node().is_none());
        assert!(graph.terrain_node().is_none());
    }

    #[test]
    fn test_builder() {
        let graph = GameGraph::default()
            .with_node(Node::new("p", NodeType::Player, 1.0, 2.0))
            .with_edge(Edge::new("e", "p", "p").with_properties(
                EdgeProperties::new(ConnectionType::Default, ConnectionEffect::Heal).with_value(5.0),
            ));

        assert!(graph.node(&NodeId::from("p")).is_some());
        let props = graph.edges[0].decode_properties().unwrap().unwrap();
        assert_eq!(props.value, Some(5.0));
    }
}
