//! Character model rules: experience, level-ups, HP and MP changes.

use super::skills::{learn_skill, SkillId};
use crate::core::balance::BalanceConfig;
use crate::core::error::{GameError, GameResult};
use crate::core::game_state::SaveState;

/// Level reached with `exp` total experience: the lowest level whose
/// threshold `level * exp_per_level` is still above `exp`, capped at
/// `u32::MAX`.
pub fn level_for_exp(exp: u64, config: &BalanceConfig) -> u32 {
    if config.exp_per_level == 0 {
        return 1;
    }
    let level = (exp / config.exp_per_level).saturating_add(1);
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Adds experience and processes every level-up it pays for.
///
/// `exp` is a running total and is not spent by leveling: the hero levels
/// while `exp >= level * exp_per_level`. Each level grows max HP and fully
/// restores HP (and MP when configured). Skills whose unlock level has
/// been reached are learned.
///
/// Returns the number of levels gained.
pub fn gain_exp(state: &mut SaveState, amount: u64, config: &BalanceConfig) -> u32 {
    state.exp = state.exp.saturating_add(amount);

    let target = level_for_exp(state.exp, config);
    if target <= state.level {
        return 0;
    }
    let levelups = target - state.level;

    state.level = target;
    state.max_hp = state
        .max_hp
        .saturating_add(config.max_hp_growth.saturating_mul(levelups));
    state.hp = state.max_hp;
    if config.restore_mp_on_level_up {
        state.mp = state.max_mp;
    }
    for skill in SkillId::ALL {
        if state.level >= skill.unlock_level(config) && learn_skill(state, skill) {
            tracing::info!(%skill, "skill learned");
        }
    }

    tracing::info!(level = state.level, levelups, "hero leveled up");
    levelups
}

/// Applies damage, flooring HP at zero. Returns the damage actually taken.
pub fn take_damage(state: &mut SaveState, amount: u32) -> u32 {
    let before = state.hp;
    state.hp = state.hp.saturating_sub(amount);
    before - state.hp
}

/// Heals, capping HP at max. Returns the HP actually restored.
pub fn heal(state: &mut SaveState, amount: u32) -> u32 {
    let before = state.hp;
    state.hp = state.hp.saturating_add(amount).min(state.max_hp);
    state.hp - before
}

/// Restores MP, capping at max. Returns the MP actually restored.
pub fn restore_mp(state: &mut SaveState, amount: u32) -> u32 {
    let before = state.mp;
    state.mp = state.mp.saturating_add(amount).min(state.max_mp);
    state.mp - before
}

/// Spends MP for a skill; fails without touching state if short.
pub fn spend_mp(state: &mut SaveState, cost: u32) -> GameResult<()> {
    if state.mp < cost {
        return Err(GameError::NotEnoughMp {
            needed: cost,
            have: state.mp,
        });
    }
    state.mp -= cost;
    Ok(())
}

pub fn is_alive(state: &SaveState) -> bool {
    state.hp > 0
}
