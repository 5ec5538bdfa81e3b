//! Engine tuning.
//!
//! [`EngineConfig::default`] reproduces the behavior the editor's authors tuned
//! their games against. A TOML file may override any subset of the values.

use std::path::Path;

use game_graph::{MovementType, NodeType, WorldBoundary};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Collision radius for each kind of game object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionRadii {
    pub enemy: f64,
    pub item: f64,
    pub trigger: f64,
    pub terrain: f64,
    /// Used for any other node type.
    pub fallback: f64,
}

impl Default for CollisionRadii {
    fn default() -> Self {
        Self {
            enemy: 30.0,
            item: 20.0,
            trigger: 40.0,
            terrain: 50.0,
            fallback: 25.0,
        }
    }
}

impl CollisionRadii {
    pub fn for_type(&self, node_type: NodeType) -> f64 {
        match node_type {
            NodeType::Enemy => self.enemy,
            NodeType::Item => self.item,
            NodeType::Trigger => self.trigger,
            NodeType::Terrain => self.terrain,
            NodeType::Player | NodeType::Unknown => self.fallback,
        }
    }
}

/// Values substituted for properties the author left unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoringDefaults {
    pub player_health: f64,
    pub player_speed: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,
    pub movement_type: MovementType,

    pub world_width: f64,
    pub world_height: f64,
    pub world_boundary: WorldBoundary,

    pub enemy_damage: f64,
    pub detection_range: f64,
    pub patrol_distance: f64,

    pub trigger_radius: f64,

    pub item_heal: f64,
    pub item_speed_bonus: f64,
    pub item_invincibility_ms: f64,

    pub connection_damage: f64,
    pub connection_heal: f64,
}

impl Default for AuthoringDefaults {
    fn default() -> Self {
        Self {
            player_health: 100.0,
            player_speed: 5.0,
            spawn_x: 400.0,
            spawn_y: 300.0,
            movement_type: MovementType::XyAxis,
            world_width: 800.0,
            world_height: 600.0,
            world_boundary: WorldBoundary::Solid,
            enemy_damage: 10.0,
            detection_range: 150.0,
            patrol_distance: 100.0,
            trigger_radius: 50.0,
            item_heal: 20.0,
            item_speed_bonus: 2.0,
            item_invincibility_ms: 3000.0,
            connection_damage: 10.0,
            connection_heal: 20.0,
        }
    }
}

/// Configuration for the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame length that speeds are expressed against (60 fps).
    pub baseline_frame_ms: f64,

    /// Collision radius of the player.
    pub player_radius: f64,

    /// Distance kept from the world edge under the solid boundary.
    pub boundary_margin: f64,

    pub collision_radii: CollisionRadii,

    /// Enemy chase speed, in units per baseline frame.
    pub chase_speed: f64,

    /// Chasing enemies stop once this close to the player.
    pub chase_min_distance: f64,

    /// Enemy patrol speed, in units per baseline frame.
    pub patrol_speed: f64,

    /// Minimum time between two collision events on the same object.
    pub collision_debounce_ms: f64,

    /// Minimum time between two proximity activations of the same trigger.
    pub proximity_debounce_ms: f64,

    /// Invincibility granted after taking damage.
    pub hit_invincibility_ms: f64,

    /// Lifetime of the speed effect granted by a speed item.
    pub speed_effect_duration_ms: f64,

    /// Lower bound for the player's derived speed. `None` lets stacked negative
    /// speed effects invert movement.
    pub min_player_speed: Option<f64>,

    pub defaults: AuthoringDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_frame_ms: 16.67,
            player_radius: 20.0,
            boundary_margin: 20.0,
            collision_radii: CollisionRadii::default(),
            chase_speed: 2.0,
            chase_min_distance: 5.0,
            patrol_speed: 1.0,
            collision_debounce_ms: 100.0,
            proximity_debounce_ms: 1000.0,
            hit_invincibility_ms: 1000.0,
            speed_effect_duration_ms: 5000.0,
            min_player_speed: None,
            defaults: AuthoringDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys keep their default values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Reject values that would make the frame math meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.baseline_frame_ms > 0.0) {
            return Err(invalid("baseline_frame_ms", "must be greater than zero"));
        }

        let non_negative = [
            ("player_radius", self.player_radius),
            ("boundary_margin", self.boundary_margin),
            ("collision_radii.enemy", self.collision_radii.enemy),
            ("collision_radii.item", self.collision_radii.item),
            ("collision_radii.trigger", self.collision_radii.trigger),
            ("collision_radii.terrain", self.collision_radii.terrain),
            ("collision_radii.fallback", self.collision_radii.fallback),
            ("chase_min_distance", self.chase_min_distance),
            ("collision_debounce_ms", self.collision_debounce_ms),
            ("proximity_debounce_ms", self.proximity_debounce_ms),
            ("hit_invincibility_ms", self.hit_invincibility_ms),
            ("speed_effect_duration_ms", self.speed_effect_duration_ms),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(field, "must not be negative"));
            }
        }

        Ok(())
    }

    /// Scale factor turning per-baseline-frame speeds into per-`delta_ms` steps.
    pub fn frame_scale(&self, delta_ms: f64) -> f64 {
        delta_ms / self.baseline_frame_ms
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_authored_tuning() {
        let config = EngineConfig::default();
        assert_eq!(config.baseline_frame_ms, 16.67);
        assert_eq!(config.collision_radii.for_type(NodeType::Enemy), 30.0);
        assert_eq!(config.collision_radii.for_type(NodeType::Unknown), 25.0);
        assert_eq!(config.defaults.world_boundary, WorldBoundary::Solid);
        assert!(config.min_player_speed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            chase_speed = 3.5
            min_player_speed = 0.0

            [collision_radii]
            item = 12.0

            [defaults]
            world_boundary = "wrap"
            movement_type = "xOnly"
            "#,
        )
        .unwrap();

        assert_eq!(config.chase_speed, 3.5);
        assert_eq!(config.min_player_speed, Some(0.0));
        assert_eq!(config.collision_radii.item, 12.0);
        assert_eq!(config.collision_radii.enemy, 30.0);
        assert_eq!(config.defaults.world_boundary, WorldBoundary::Wrap);
        assert_eq!(config.defaults.movement_type, MovementType::XOnly);
        assert_eq!(config.patrol_speed, 1.0);
    }

    #[test]
    fn test_invalid_baseline_rejected() {
        let err = EngineConfig::from_toml_str("baseline_frame_ms = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "baseline_frame_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_debounce_rejected() {
        let err = EngineConfig::from_toml_str("proximity_debounce_ms = -1.0").unwrap_err();
        assert!(err.to_string().contains("proximity_debounce_ms"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("chase_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_toml_file("/nonexistent/tesserae.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_frame_scale() {
        let config = EngineConfig::default();
        assert!((config.frame_scale(16.67) - 1.0).abs() < 1e-12);
        assert!((config.frame_scale(33.34) - 2.0).abs() < 1e-12);
    }
}
