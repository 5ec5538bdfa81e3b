//! Player movement integration.

use game_graph::{MovementType, Position};

use crate::config::EngineConfig;
use crate::input::KeyState;
use crate::state::{Player, WorldBounds};

/// Move the player according to held keys, then apply the world edge policy.
///
/// Steps are frame-rate independent: the player covers `speed` units per
/// baseline frame. Vertical keys are ignored unless the player moves on both
/// axes.
pub fn integrate(
    player: &mut Player,
    bounds: &WorldBounds,
    keys: &KeyState,
    delta_ms: f64,
    config: &EngineConfig,
) {
    let step = player.speed * config.frame_scale(delta_ms);

    let mut dx = 0.0;
    let mut dy = 0.0;

    if keys.is_down("a") {
        dx -= step;
    }
    if keys.is_down("d") {
        dx += step;
    }

    if player.movement_type == MovementType::XyAxis {
        if keys.is_down("w") {
            dy -= step;
        }
        if keys.is_down("s") {
            dy += step;
        }
    }

    let candidate = Position::new(player.position.x + dx, player.position.y + dy);
    player.position = bounds.constrain(candidate, config.boundary_margin);
}
