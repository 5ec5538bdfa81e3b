//! Status effect bookkeeping and derived player stats.

use crate::config::EngineConfig;
use crate::state::{EffectType, GameEffect, Player};

/// Count down timed effects, drop the expired ones and recompute derived stats.
pub fn tick(player: &mut Player, delta_ms: f64, config: &EngineConfig) {
    player.effects.retain_mut(|effect| match effect.time_remaining.as_mut() {
        Some(remaining) => {
            *remaining -= delta_ms;
            *remaining > 0.0
        }
        None => true,
    });

    recompute_stats(player, config);
}

/// Recompute derived stats from scratch from the current effect list.
pub fn recompute_stats(player: &mut Player, config: &EngineConfig) {
    let bonus = total_value(&player.effects, EffectType::Speed);
    let speed = player.base_speed + bonus;

    player.speed = match config.min_player_speed {
        Some(floor) => speed.max(floor),
        None => speed,
    };
}

/// Add an effect to the player and refresh derived stats.
pub fn apply(player: &mut Player, effect: GameEffect, config: &EngineConfig) {
    tracing::debug!(
        effect = %effect.id,
        kind = ?effect.effect_type,
        value = effect.value,
        duration = ?effect.duration,
        "effect applied"
    );
    player.effects.push(effect);
    recompute_stats(player, config);
}

/// Sum of the values of every effect of the given type.
pub fn total_value(effects: &[GameEffect], effect_type: EffectType) -> f64 {
    effects
        .iter()
        .filter(|e| e.effect_type == effect_type)
        .map(|e| e.value)
        .sum()
}
