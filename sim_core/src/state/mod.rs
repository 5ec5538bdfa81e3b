//! Runtime game state - the mutable world a compiled graph turns into.

mod compiler;

pub use compiler::*;

use std::collections::HashMap;

use game_graph::{
    ConnectionEffect, ConnectionType, EdgeProperties, EnemyBehavior, ItemEffect, MovementType,
    NodeId, NodeType, Position, TerrainKind, TriggerActivation, WorldBoundary,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::TriggerKind;

/// Unique identifier for a status effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub Uuid);

impl EffectId {
    /// Create a new random effect ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EffectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stats a status effect can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Speed,
}

/// A status effect on the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEffect {
    pub id: EffectId,
    pub effect_type: EffectType,
    pub value: f64,
    /// None = lasts for the rest of the run.
    pub duration: Option<f64>,
    pub time_remaining: Option<f64>,
}

impl GameEffect {
    /// An effect that expires after `duration_ms`.
    pub fn timed(effect_type: EffectType, value: f64, duration_ms: f64) -> Self {
        Self {
            id: EffectId::new(),
            effect_type,
            value,
            duration: Some(duration_ms),
            time_remaining: Some(duration_ms),
        }
    }

    /// An effect that never expires.
    pub fn permanent(effect_type: EffectType, value: f64) -> Self {
        Self {
            id: EffectId::new(),
            effect_type,
            value,
            duration: None,
            time_remaining: None,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.time_remaining.is_none()
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// Derived: `base_speed` plus all active speed effects.
    pub speed: f64,
    /// Authored speed, fixed for the run.
    pub base_speed: f64,
    /// Picked-up item IDs, in pickup order.
    pub inventory: Vec<NodeId>,
    pub effects: Vec<GameEffect>,
    pub invincible: bool,
    /// Clock time (ms) at which invincibility ends.
    pub invincible_until: f64,
    pub movement_type: MovementType,
    pub can_jump: bool,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Health as a fraction of max health, for health bars.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn has_item(&self, item: &NodeId) -> bool {
        self.inventory.contains(item)
    }

    /// Apply damage unless invincible. A hit grants `invincibility_ms` of
    /// invincibility. Returns whether the damage landed.
    pub fn damage(&mut self, amount: f64, now: f64, invincibility_ms: f64) -> bool {
        if self.invincible {
            return false;
        }

        self.health = (self.health - amount).max(0.0);
        self.grant_invincibility(now + invincibility_ms);
        true
    }

    /// Restore health, capped at max health. Returns the health after healing.
    pub fn heal(&mut self, amount: f64) -> f64 {
        self.health = (self.health + amount).min(self.max_health);
        self.health
    }

    pub fn grant_invincibility(&mut self, until: f64) {
        self.invincible = true;
        self.invincible_until = until;
    }

    /// Clear invincibility once its deadline is reached. Afterwards an
    /// invincible player always has `now < invincible_until`.
    pub fn expire_invincibility(&mut self, now: f64) {
        if self.invincible && now >= self.invincible_until {
            self.invincible = false;
        }
    }
}

/// Resolved enemy properties. `patrol_direction` changes during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    pub health: f64,
    pub damage: f64,
    pub behavior: EnemyBehavior,
    pub detection_range: f64,
    pub patrol_distance: f64,
    pub patrol_direction: f64,
}

/// Resolved terrain properties. Only the first terrain's bounds shape the world;
/// the rest is carried for hosts that render terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainState {
    pub kind: TerrainKind,
    pub solid: bool,
    pub friction: f64,
    pub world_boundary: WorldBoundary,
    pub width: f64,
    pub height: f64,
}

/// Resolved item properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemState {
    pub pickupable: bool,
    pub effect: ItemEffect,
    /// Effect magnitude, already defaulted for the effect kind.
    pub value: f64,
}

/// Resolved trigger properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerState {
    pub activation: TriggerActivation,
    pub one_time: bool,
    /// Proximity radius, independent of the collision radius.
    pub radius: f64,
}

impl TriggerState {
    /// The radius to test when this trigger reacts to proximity.
    pub fn proximity_radius(&self) -> Option<f64> {
        (self.activation == TriggerActivation::Proximity).then_some(self.radius)
    }
}

/// Type-specific properties of a game object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectProperties {
    Enemy(EnemyState),
    Terrain(TerrainState),
    Item(ItemState),
    Trigger(TriggerState),
    /// Node types without runtime behavior.
    Inert,
}

/// Last firing time of each event kind on an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivationLog {
    pub collision: Option<f64>,
    pub proximity: Option<f64>,
}

impl ActivationLog {
    pub fn get(&self, kind: TriggerKind) -> Option<f64> {
        match kind {
            TriggerKind::Collision => self.collision,
            TriggerKind::Proximity => self.proximity,
        }
    }

    pub fn record(&mut self, kind: TriggerKind, now: f64) {
        match kind {
            TriggerKind::Collision => self.collision = Some(now),
            TriggerKind::Proximity => self.proximity = Some(now),
        }
    }

    /// Whether `kind` fired less than `window_ms` before `now`.
    pub fn is_debounced(&self, kind: TriggerKind, now: f64, window_ms: f64) -> bool {
        self.get(kind).is_some_and(|last| now - last < window_ms)
    }
}

/// A non-player entity in the running game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: NodeId,
    pub object_type: NodeType,
    pub position: Position,
    /// Authored position; patrols are measured against it.
    pub original_position: Position,
    pub properties: ObjectProperties,
    pub active: bool,
    pub collision_radius: f64,
    pub activations: ActivationLog,
}

impl GameObject {
    /// Most recent collision or proximity firing, if any.
    pub fn last_activated(&self) -> Option<f64> {
        match (self.activations.collision, self.activations.proximity) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyState> {
        match &self.properties {
            ObjectProperties::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemState> {
        match &self.properties {
            ObjectProperties::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn as_trigger(&self) -> Option<&TriggerState> {
        match &self.properties {
            ObjectProperties::Trigger(trigger) => Some(trigger),
            _ => None,
        }
    }
}

/// A compiled edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub connection_type: ConnectionType,
    pub effect: ConnectionEffect,
    /// Effect magnitude, already defaulted for the effect kind.
    pub value: f64,
    /// The edge's authored property record.
    pub properties: EdgeProperties,
}

impl Connection {
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// Whether this connection fires for events detected by `kind`.
    ///
    /// `pickup` connections never match; item pickups run through the direct
    /// collision path instead.
    pub fn responds_to(&self, kind: TriggerKind) -> bool {
        matches!(
            (self.connection_type, kind),
            (ConnectionType::Default, _)
                | (ConnectionType::Collision, TriggerKind::Collision)
                | (ConnectionType::Trigger, TriggerKind::Proximity)
        )
    }
}

/// Size of the world and its edge policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
    pub boundary: WorldBoundary,
}

impl WorldBounds {
    /// Apply the edge policy to a candidate position.
    ///
    /// Wrapping resets to the opposite edge rather than taking a modulo, so a
    /// fast mover lands exactly on the edge.
    pub fn constrain(&self, position: Position, margin: f64) -> Position {
        match self.boundary {
            WorldBoundary::Solid => Position::new(
                position.x.min(self.width - margin).max(margin),
                position.y.min(self.height - margin).max(margin),
            ),
            WorldBoundary::Wrap => Position::new(
                wrap_axis(position.x, self.width),
                wrap_axis(position.y, self.height),
            ),
            WorldBoundary::None => position,
        }
    }
}

fn wrap_axis(value: f64, extent: f64) -> f64 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Game objects keyed by node ID, iterated in authored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ObjectMap {
    order: Vec<NodeId>,
    objects: HashMap<NodeId, GameObject>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object. Re-inserting an ID replaces the object but keeps its
    /// original place in the iteration order.
    pub fn insert(&mut self, object: GameObject) {
        let id = object.id.clone();
        if self.objects.insert(id.clone(), object).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &NodeId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.objects.contains_key(id)
    }

    /// IDs in authored order.
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.order.iter()
    }

    /// Objects in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn active(&self) -> impl Iterator<Item = &GameObject> {
        self.iter().filter(|o| o.active)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// The complete state of a running game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Every non-player node, including deactivated ones.
    pub objects: ObjectMap,
    pub connections: Vec<Connection>,
    pub world_bounds: WorldBounds,
    /// Sum of all frame deltas since the run started, in ms.
    pub game_time: f64,
}

impl GameState {
    pub fn object(&self, id: &NodeId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn active_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.active()
    }

    /// Connections touching `id` at either end, in authored order.
    pub fn connections_for<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }

    /// Set an object's active flag. Returns the new flag, or `None` if no such
    /// object exists.
    pub(crate) fn set_active(&mut self, id: &NodeId, active: bool) -> Option<bool> {
        let object = self.objects.get_mut(id)?;
        object.active = active;
        Some(active)
    }
}
