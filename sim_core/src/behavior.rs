//! Enemy behavior - per-frame AI movement for active enemies.

use game_graph::{EnemyBehavior, Position};

use crate::config::EngineConfig;
use crate::state::{EnemyState, GameObject, GameState, ObjectProperties};

/// Advance every active enemy by one frame.
pub fn update_enemies(state: &mut GameState, delta_ms: f64, config: &EngineConfig) {
    let target = state.player.position;
    let scale = config.frame_scale(delta_ms);

    let ids: Vec<_> = state.objects.ids().cloned().collect();
    for id in ids {
        let Some(object) = state.objects.get_mut(&id) else {
            continue;
        };
        if !object.active {
            continue;
        }

        let GameObject {
            position,
            original_position,
            properties,
            ..
        } = object;
        let ObjectProperties::Enemy(enemy) = properties else {
            continue;
        };

        match enemy.behavior {
            EnemyBehavior::Chase => chase(position, enemy, target, scale, config),
            EnemyBehavior::Patrol => patrol(position, *original_position, enemy, scale, config),
            EnemyBehavior::Stationary => {}
        }
    }
}

/// Move straight toward `target` while it is inside the detection range.
///
/// Enemies within `chase_min_distance` hold still so they do not jitter on top
/// of the player.
fn chase(
    position: &mut Position,
    enemy: &EnemyState,
    target: Position,
    scale: f64,
    config: &EngineConfig,
) {
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance > config.chase_min_distance && distance <= enemy.detection_range {
        let step = config.chase_speed * scale;
        position.x += dx / distance * step;
        position.y += dy / distance * step;
    }
}

/// Walk back and forth along x, turning once past `patrol_distance` from home.
fn patrol(
    position: &mut Position,
    home: Position,
    enemy: &mut EnemyState,
    scale: f64,
    config: &EngineConfig,
) {
    position.x += enemy.patrol_direction * config.patrol_speed * scale;

    if (position.x - home.x).abs() > enemy.patrol_distance {
        enemy.patrol_direction = -enemy.patrol_direction;
    }
}
