//! Item pickup - the direct effect of colliding with an item.

use game_graph::{ItemEffect, NodeId};

use crate::config::EngineConfig;
use crate::effects;
use crate::events::heal_player;
use crate::report::{FrameEvent, FrameReport};
use crate::state::{EffectType, GameEffect, GameState};

/// Pick up `item_id` if it is a pickupable item.
///
/// The item goes into the inventory, its effect is applied, and the item is
/// deactivated so it cannot be collected twice.
pub fn pick_up(
    state: &mut GameState,
    item_id: &NodeId,
    now: f64,
    config: &EngineConfig,
    report: &mut FrameReport,
) {
    let Some(item) = state.objects.get(item_id).and_then(|o| o.as_item()).cloned() else {
        return;
    };
    if !item.pickupable {
        return;
    }

    state.player.inventory.push(item_id.clone());
    tracing::debug!(item = %item_id, effect = ?item.effect, value = item.value, "item picked up");
    report.push(FrameEvent::ItemPickedUp {
        item: item_id.clone(),
        effect: item.effect,
    });

    match item.effect {
        ItemEffect::Health => heal_player(state, item.value, report),
        ItemEffect::Speed => effects::apply(
            &mut state.player,
            GameEffect::timed(EffectType::Speed, item.value, config.speed_effect_duration_ms),
            config,
        ),
        ItemEffect::Invincible => state.player.grant_invincibility(now + item.value),
        // Jump is offered by the editor but has no runtime effect.
        ItemEffect::None | ItemEffect::Jump => {}
    }

    state.set_active(item_id, false);
}
