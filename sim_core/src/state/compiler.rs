//! State compiler - turns an authored graph into a fresh [`GameState`].
//!
//! Compilation never fails. Missing nodes, missing records, mistyped fields and
//! records that are not objects all fall back to the defaults in
//! [`AuthoringDefaults`], one field at a time.

use game_graph::{
    ConnectionEffect, Edge, EdgeProperties, EnemyBehavior, EnemyProperties, GameGraph, ItemEffect,
    ItemProperties, Node, NodeType, PlayerProperties, Position, TerrainKind, TerrainProperties,
    TriggerActivation, TriggerProperties, WorldBoundary,
};
use serde::de::DeserializeOwned;

use super::{
    ActivationLog, Connection, EnemyState, GameObject, GameState, ItemState, ObjectMap,
    ObjectProperties, Player, TerrainState, TriggerState, WorldBounds,
};
use crate::config::{AuthoringDefaults, EngineConfig};

/// Build the initial runtime state for `graph`.
pub fn compile(graph: &GameGraph, config: &EngineConfig) -> GameState {
    let defaults = &config.defaults;

    let player_props: PlayerProperties = graph
        .player_node()
        .and_then(decode_or_warn)
        .unwrap_or_default();
    let terrain_props: TerrainProperties = graph
        .terrain_node()
        .and_then(decode_or_warn)
        .unwrap_or_default();

    let mut objects = ObjectMap::new();
    for node in &graph.nodes {
        if node.node_type == NodeType::Player || !node.has_properties() {
            continue;
        }
        objects.insert(compile_object(node, config));
    }

    let connections: Vec<Connection> = graph
        .edges
        .iter()
        .filter_map(|edge| compile_connection(edge, defaults))
        .collect();

    let base_speed = player_props.speed.unwrap_or(defaults.player_speed);
    let health = player_props.health.unwrap_or(defaults.player_health);

    let player = Player {
        position: Position::new(
            player_props.spawn_x.unwrap_or(defaults.spawn_x),
            player_props.spawn_y.unwrap_or(defaults.spawn_y),
        ),
        health,
        max_health: health,
        speed: base_speed,
        base_speed,
        inventory: Vec::new(),
        effects: Vec::new(),
        invincible: false,
        invincible_until: 0.0,
        movement_type: player_props.movement_type.unwrap_or(defaults.movement_type),
        can_jump: player_props.can_jump.unwrap_or(false),
    };

    let world_bounds = WorldBounds {
        width: terrain_props.width.unwrap_or(defaults.world_width),
        height: terrain_props.height.unwrap_or(defaults.world_height),
        boundary: terrain_props
            .world_boundary
            .unwrap_or(defaults.world_boundary),
    };

    tracing::debug!(
        objects = objects.len(),
        connections = connections.len(),
        has_player = graph.player_node().is_some(),
        boundary = ?world_bounds.boundary,
        "compiled game graph"
    );

    GameState {
        player,
        objects,
        connections,
        world_bounds,
        game_time: 0.0,
    }
}

fn compile_object(node: &Node, config: &EngineConfig) -> GameObject {
    let defaults = &config.defaults;
    let properties = match node.node_type {
        NodeType::Enemy => ObjectProperties::Enemy(enemy_state(
            decode_or_warn(node).unwrap_or_default(),
            defaults,
        )),
        NodeType::Terrain => ObjectProperties::Terrain(terrain_state(
            decode_or_warn(node).unwrap_or_default(),
            defaults,
        )),
        NodeType::Item => ObjectProperties::Item(item_state(
            decode_or_warn(node).unwrap_or_default(),
            defaults,
        )),
        NodeType::Trigger => ObjectProperties::Trigger(trigger_state(
            decode_or_warn(node).unwrap_or_default(),
            defaults,
        )),
        NodeType::Player | NodeType::Unknown => ObjectProperties::Inert,
    };

    GameObject {
        id: node.id.clone(),
        object_type: node.node_type,
        position: node.position,
        original_position: node.position,
        properties,
        active: true,
        collision_radius: config.collision_radii.for_type(node.node_type),
        activations: ActivationLog::default(),
    }
}

fn compile_connection(edge: &Edge, defaults: &AuthoringDefaults) -> Option<Connection> {
    let properties = match edge.decode_properties() {
        Ok(props) => props?,
        Err(err) => {
            tracing::warn!(edge = %edge.id, error = %err, "using defaults for unreadable edge properties");
            EdgeProperties::default()
        }
    };
    let effect = properties.effect.unwrap_or_default();
    let value = properties.value.unwrap_or(match effect {
        ConnectionEffect::Damage => defaults.connection_damage,
        ConnectionEffect::Heal => defaults.connection_heal,
        _ => 0.0,
    });

    Some(Connection {
        id: edge.id.clone(),
        source: edge.source.clone(),
        target: edge.target.clone(),
        connection_type: properties.connection_type.unwrap_or_default(),
        effect,
        value,
        properties,
    })
}

fn enemy_state(props: EnemyProperties, defaults: &AuthoringDefaults) -> EnemyState {
    EnemyState {
        health: props.health.unwrap_or(0.0),
        damage: props.damage.unwrap_or(defaults.enemy_damage),
        behavior: props.behavior.unwrap_or(EnemyBehavior::Stationary),
        detection_range: props.detection_range.unwrap_or(defaults.detection_range),
        patrol_distance: props.patrol_distance.unwrap_or(defaults.patrol_distance),
        // A zero direction would freeze the patrol.
        patrol_direction: props
            .patrol_direction
            .filter(|d| *d != 0.0)
            .unwrap_or(1.0),
    }
}

fn terrain_state(props: TerrainProperties, defaults: &AuthoringDefaults) -> TerrainState {
    TerrainState {
        kind: props.kind.unwrap_or(TerrainKind::Ground),
        solid: props.solid.unwrap_or(false),
        friction: props.friction.unwrap_or(0.0),
        world_boundary: props.world_boundary.unwrap_or(defaults.world_boundary),
        width: props.width.unwrap_or(defaults.world_width),
        height: props.height.unwrap_or(defaults.world_height),
    }
}

fn item_state(props: ItemProperties, defaults: &AuthoringDefaults) -> ItemState {
    let effect = props.effect.unwrap_or(ItemEffect::None);
    let value = props.value.unwrap_or(match effect {
        ItemEffect::Health => defaults.item_heal,
        ItemEffect::Speed => defaults.item_speed_bonus,
        ItemEffect::Invincible => defaults.item_invincibility_ms,
        ItemEffect::None | ItemEffect::Jump => 0.0,
    });

    ItemState {
        pickupable: props.pickupable.unwrap_or(false),
        effect,
        value,
    }
}

fn trigger_state(props: TriggerProperties, defaults: &AuthoringDefaults) -> TriggerState {
    TriggerState {
        activation: props.activation.unwrap_or(TriggerActivation::Unknown),
        one_time: props.one_time.unwrap_or(false),
        radius: props.radius.unwrap_or(defaults.trigger_radius),
    }
}

/// Decode a node's record. Mistyped fields already read as unset; a record that
/// is not an object at all is logged and discarded.
fn decode_or_warn<P: DeserializeOwned>(node: &Node) -> Option<P> {
    match node.decode_properties() {
        Ok(props) => props,
        Err(err) => {
            tracing::warn!(node = %node.id, error = %err, "using defaults for unreadable properties");
            None
        }
    }
}
