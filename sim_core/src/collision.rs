//! Collision and trigger detection against the player.
//!
//! Every active object is tested each frame for two independent events:
//!
//! - **collision**: the player's circle overlaps the object's circle
//! - **proximity**: the object is a proximity trigger and the player is inside
//!   its trigger radius
//!
//! Each event kind has its own debounce window per object, so a trigger the
//! player stands on can raise both events in the same frame.

use game_graph::NodeId;

use crate::config::EngineConfig;
use crate::events::{self, TriggerKind};
use crate::pickup;
use crate::report::{FrameEvent, FrameReport};
use crate::state::{GameState, ObjectProperties};

/// Run detection for all objects and resolve whatever fires.
///
/// Distances are measured from where the player stood when detection began,
/// even if a connection teleports the player part-way through the pass.
pub fn detect_and_resolve(
    state: &mut GameState,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    let origin = state.player.position;
    let ids: Vec<NodeId> = state.objects.ids().cloned().collect();

    for id in &ids {
        let Some(object) = state.objects.get(id) else {
            continue;
        };
        if !object.active {
            continue;
        }

        let distance = origin.distance_to(object.position);

        if distance < config.player_radius + object.collision_radius
            && !object
                .activations
                .is_debounced(TriggerKind::Collision, now, config.collision_debounce_ms)
        {
            fire_collision(state, id, now, config, report);
        }

        // Re-read: the collision may have changed the object.
        let Some(object) = state.objects.get(id) else {
            continue;
        };
        let Some(radius) = object.as_trigger().and_then(|t| t.proximity_radius()) else {
            continue;
        };
        if object.active
            && distance < radius
            && !object
                .activations
                .is_debounced(TriggerKind::Proximity, now, config.proximity_debounce_ms)
        {
            fire_proximity(state, id, now, config, report);
        }
    }
}

fn fire_collision(
    state: &mut GameState,
    id: &NodeId,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    if let Some(object) = state.objects.get_mut(id) {
        object.activations.record(TriggerKind::Collision, now);
    }
    tracing::debug!(object = %id, "collision");
    report.push(FrameEvent::Collision { object: id.clone() });

    events::execute_connections(state, id, TriggerKind::Collision, now, config, report);

    let direct = state.objects.get(id).map(|o| o.properties.clone());
    match direct {
        Some(ObjectProperties::Item(_)) => pickup::pick_up(state, id, now, config, report),
        Some(ObjectProperties::Enemy(enemy)) => {
            events::damage_player(state, enemy.damage, now, config, report)
        }
        _ => {}
    }
}

fn fire_proximity(
    state: &mut GameState,
    id: &NodeId,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    let one_time = match state.objects.get_mut(id) {
        Some(object) => {
            object.activations.record(TriggerKind::Proximity, now);
            object.as_trigger().is_some_and(|t| t.one_time)
        }
        None => return,
    };
    tracing::debug!(trigger = %id, one_time, "proximity trigger activated");
    report.push(FrameEvent::ProximityActivated { trigger: id.clone() });

    events::execute_connections(state, id, TriggerKind::Proximity, now, config, report);

    if one_time {
        state.set_active(id, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::compile;
    use game_graph::{
        ConnectionEffect, ConnectionType, Edge, EdgeProperties, GameGraph, Node, NodeType,
    };
    use serde_json::json;

    fn graph_with(nodes: Vec<Node>, edges: Vec<Edge>) -> GameState {
        let mut all = vec![Node::new("p", NodeType::Player, 0.0, 0.0)
            .with_properties(json!({ "spawnX": 400, "spawnY": 300 }))];
        all.extend(nodes);
        compile(&GameGraph::new(all, edges), &EngineConfig::default())
    }

    fn detect(state: &mut GameState, now: f64) -> FrameReport {
        let mut report = FrameReport::default();
        detect_and_resolve(state, now, &EngineConfig::default(), &mut report);
        report
    }

    #[test]
    fn test_collision_threshold_is_strict() {
        // Enemy radius 30 + player radius 20 = 50
        let mut touching = graph_with(
            vec![Node::new("e", NodeType::Enemy, 449.0, 300.0).with_properties(json!({}))],
            vec![],
        );
        assert_eq!(detect(&mut touching, 0.0).collisions().count(), 1);

        let mut grazing = graph_with(
            vec![Node::new("e", NodeType::Enemy, 450.0, 300.0).with_properties(json!({}))],
            vec![],
        );
        assert_eq!(detect(&mut grazing, 0.0).collisions().count(), 0);
    }

    #[test]
    fn test_enemy_contact_damages() {
        let mut state = graph_with(
            vec![Node::new("e", NodeType::Enemy, 400.0, 300.0).with_properties(json!({ "damage": 25 }))],
            vec![],
        );

        let report = detect(&mut state, 0.0);
        assert_eq!(report.damage_taken(), 25.0);
        assert_eq!(state.player.health, 75.0);
    }

    #[test]
    fn test_collision_debounce() {
        let mut state = graph_with(
            vec![Node::new("e", NodeType::Enemy, 400.0, 300.0).with_properties(json!({}))],
            vec![],
        );
        let id = NodeId::from("e");

        assert_eq!(detect(&mut state, 0.0).collisions().count(), 1);
        assert_eq!(detect(&mut state, 50.0).collisions().count(), 0);
        assert_eq!(detect(&mut state, 99.9).collisions().count(), 0);
        assert_eq!(detect(&mut state, 100.0).collisions().count(), 1);
        assert_eq!(state.object(&id).unwrap().last_activated(), Some(100.0));
    }

    #[test]
    fn test_inactive_objects_are_ignored() {
        let mut state = graph_with(
            vec![Node::new("e", NodeType::Enemy, 400.0, 300.0).with_properties(json!({}))],
            vec![],
        );
        state.set_active(&NodeId::from("e"), false);

        assert!(detect(&mut state, 0.0).is_empty());
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn test_trigger_raises_both_events() {
        let mut state = graph_with(
            vec![Node::new("t", NodeType::Trigger, 400.0, 300.0)
                .with_properties(json!({ "activation": "proximity" }))],
            vec![],
        );

        let report = detect(&mut state, 0.0);
        assert_eq!(report.collisions().count(), 1);
        assert_eq!(report.proximity_activations().count(), 1);
    }

    #[test]
    fn test_proximity_uses_trigger_radius() {
        // Inside the collision circle (20 + 40) but outside the trigger radius
        let mut state = graph_with(
            vec![Node::new("t", NodeType::Trigger, 455.0, 300.0)
                .with_properties(json!({ "activation": "proximity", "radius": 50 }))],
            vec![],
        );

        let report = detect(&mut state, 0.0);
        assert_eq!(report.collisions().count(), 1);
        assert_eq!(report.proximity_activations().count(), 0);
    }

    #[test]
    fn test_proximity_debounce() {
        let mut state = graph_with(
            vec![Node::new("t", NodeType::Trigger, 400.0, 300.0)
                .with_properties(json!({ "activation": "proximity", "radius": 200 }))],
            vec![],
        );

        assert_eq!(detect(&mut state, 0.0).proximity_activations().count(), 1);
        assert_eq!(detect(&mut state, 500.0).proximity_activations().count(), 0);
        assert_eq!(detect(&mut state, 1000.0).proximity_activations().count(), 1);
    }

    #[test]
    fn test_non_proximity_trigger_only_collides() {
        let mut state = graph_with(
            vec![Node::new("t", NodeType::Trigger, 400.0, 300.0)
                .with_properties(json!({ "activation": "interact", "radius": 500 }))],
            vec![],
        );

        let report = detect(&mut state, 0.0);
        assert_eq!(report.collisions().count(), 1);
        assert_eq!(report.proximity_activations().count(), 0);
    }

    #[test]
    fn test_one_time_trigger_fires_once() {
        let mut state = graph_with(
            vec![Node::new("t", NodeType::Trigger, 430.0, 300.0)
                .with_properties(json!({ "activation": "proximity", "oneTime": true, "radius": 50 }))],
            vec![Edge::new("zap", "t", "p").with_properties(
                EdgeProperties::new(ConnectionType::Trigger, ConnectionEffect::Damage).with_value(5.0),
            )],
        );

        let first = detect(&mut state, 0.0);
        assert_eq!(first.fired_connections().collect::<Vec<_>>(), vec!["zap"]);
        assert!(!state.object(&NodeId::from("t")).unwrap().active);

        // Leave and come back much later
        state.player.position.x = 100.0;
        detect(&mut state, 5000.0);
        state.player.position.x = 430.0;
        let second = detect(&mut state, 10000.0);
        assert!(second.is_empty());
        assert_eq!(state.player.health, 95.0);
    }

    #[test]
    fn test_item_collision_picks_up() {
        let mut state = graph_with(
            vec![Node::new("gem", NodeType::Item, 410.0, 300.0)
                .with_properties(json!({ "pickupable": true, "effect": "health" }))],
            vec![],
        );
        state.player.health = 50.0;

        detect(&mut state, 0.0);
        assert_eq!(state.player.health, 70.0);
        assert_eq!(state.player.inventory, vec![NodeId::from("gem")]);
        assert!(!state.object(&NodeId::from("gem")).unwrap().active);
    }

    #[test]
    fn test_connections_run_before_direct_effects() {
        // A heal wired to the enemy lands first; the enemy's hit follows.
        let mut state = graph_with(
            vec![Node::new("e", NodeType::Enemy, 400.0, 300.0).with_properties(json!({ "damage": 10 }))],
            vec![Edge::new("mend", "e", "p").with_properties(
                EdgeProperties::new(ConnectionType::Collision, ConnectionEffect::Heal).with_value(5.0),
            )],
        );
        state.player.health = 50.0;

        let report = detect(&mut state, 0.0);
        assert_eq!(state.player.health, 45.0);
        assert!(matches!(report.events[1], FrameEvent::ConnectionFired { .. }));
        assert!(matches!(report.events[2], FrameEvent::PlayerHealed { .. }));
        assert!(matches!(report.events[3], FrameEvent::PlayerDamaged { .. }));
    }

    #[test]
    fn test_distances_use_position_at_start_of_pass() {
        let mut state = graph_with(
            vec![
                Node::new("portal", NodeType::Trigger, 400.0, 300.0).with_properties(json!({})),
                Node::new("far", NodeType::Enemy, 1000.0, 1000.0).with_properties(json!({})),
            ],
            vec![Edge::new("warp", "portal", "far").with_properties(EdgeProperties::new(
                ConnectionType::Collision,
                ConnectionEffect::Teleport,
            ))],
        );

        let report = detect(&mut state, 0.0);
        assert_eq!(state.player.position.x, 1000.0);
        assert_eq!(report.collisions().count(), 1);
        assert_eq!(state.player.health, 100.0);
    }
}
