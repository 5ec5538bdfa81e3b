//! Event graph executor - fires the connections wired to an object.
//!
//! Edges are matched regardless of direction: a connection fires when either
//! end is the object that raised the event. Effects that act on an object
//! (`activate`, `destroy`, `teleport`) always use the connection's target.

use game_graph::{ConnectionEffect, NodeId};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::report::{FrameEvent, FrameReport};
use crate::state::{Connection, GameState};

/// Which detection path raised an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Collision,
    Proximity,
}

/// Fire every connection touching `origin` that responds to `kind`, in
/// authored order.
pub fn execute_connections(
    state: &mut GameState,
    origin: &NodeId,
    kind: TriggerKind,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    let matching: Vec<Connection> = state
        .connections_for(origin)
        .filter(|c| c.responds_to(kind))
        .cloned()
        .collect();

    for connection in &matching {
        execute_connection(state, connection, now, config, report);
    }
}

/// Apply one connection's effect.
pub fn execute_connection(
    state: &mut GameState,
    connection: &Connection,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    tracing::debug!(
        connection = %connection.id,
        effect = ?connection.effect,
        target = %connection.target,
        "connection fired"
    );
    report.push(FrameEvent::ConnectionFired {
        connection: connection.id.clone(),
        effect: connection.effect,
    });

    match connection.effect {
        ConnectionEffect::Damage => damage_player(state, connection.value, now, config, report),
        ConnectionEffect::Heal => heal_player(state, connection.value, report),
        ConnectionEffect::Teleport => {
            // Only objects can be teleport destinations; the player node is not one.
            if let Some(target) = state.objects.get(&connection.target) {
                state.player.position = target.position;
            }
        }
        ConnectionEffect::Activate => {
            if let Some(target) = state.objects.get(&connection.target) {
                let toggled = !target.active;
                state.set_active(&connection.target, toggled);
            }
        }
        ConnectionEffect::Destroy => {
            state.set_active(&connection.target, false);
        }
        ConnectionEffect::None => {}
    }
}

/// Damage the player, honoring invincibility, and record the hit.
pub fn damage_player(
    state: &mut GameState,
    amount: f64,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    let player = &mut state.player;
    if player.damage(amount, now, config.hit_invincibility_ms) {
        tracing::debug!(amount, health = player.health, "player damaged");
        report.push(FrameEvent::PlayerDamaged {
            amount,
            health_after: player.health,
        });
    }
}

/// Heal the player up to max health and record it.
pub fn heal_player(state: &mut GameState, amount: f64, report: &mut FrameReport) {
    let health_after = state.player.heal(amount);
    report.push(FrameEvent::PlayerHealed {
        amount,
        health_after,
    });
}
