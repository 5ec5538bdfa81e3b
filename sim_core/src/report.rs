//! What happened during a frame, for hosts that want more than a state diff.

use game_graph::{ConnectionEffect, ItemEffect, NodeId};
use serde::{Deserialize, Serialize};

/// A single observable occurrence within a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameEvent {
    Collision {
        object: NodeId,
    },
    ProximityActivated {
        trigger: NodeId,
    },
    ConnectionFired {
        connection: String,
        effect: ConnectionEffect,
    },
    ItemPickedUp {
        item: NodeId,
        effect: ItemEffect,
    },
    PlayerDamaged {
        amount: f64,
        health_after: f64,
    },
    PlayerHealed {
        amount: f64,
        health_after: f64,
    },
    GameOver,
}

/// Events produced by one call to `update`, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FrameReport {
    /// Game time at the end of the frame.
    pub game_time: f64,
    pub events: Vec<FrameEvent>,
}

impl FrameReport {
    pub fn new(game_time: f64) -> Self {
        Self {
            game_time,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, event: FrameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn collisions(&self) -> impl Iterator<Item = &NodeId> {
        self.events.iter().filter_map(|e| match e {
            FrameEvent::Collision { object } => Some(object),
            _ => None,
        })
    }

    pub fn proximity_activations(&self) -> impl Iterator<Item = &NodeId> {
        self.events.iter().filter_map(|e| match e {
            FrameEvent::ProximityActivated { trigger } => Some(trigger),
            _ => None,
        })
    }

    /// IDs of the connections that fired, in firing order.
    pub fn fired_connections(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            FrameEvent::ConnectionFired { connection, .. } => Some(connection.as_str()),
            _ => None,
        })
    }

    /// Total damage the player actually took this frame.
    pub fn damage_taken(&self) -> f64 {
        self.events
            .iter()
            .map(|e| match e {
                FrameEvent::PlayerDamaged { amount, .. } => *amount,
                _ => 0.0,
            })
            .sum()
    }

    pub fn is_game_over(&self) -> bool {
        self.events.iter().any(|e| matches!(e, FrameEvent::GameOver))
    }
}
