//! Offline rewards.
//!
//! Grants gold for every full hour since the last session start, with a
//! flat bonus for long absences.

use super::balance::BalanceConfig;
use super::constants::MS_PER_HOUR;
use super::game_state::SaveState;

/// Report of offline reward results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    pub hours_away: i64,
    pub gold_granted: u64,
    /// True if the long-absence bonus was part of `gold_granted`.
    pub long_absence_bonus: bool,
}

/// Gold earned for a number of full hours away.
pub fn calculate_offline_gold(hours_away: i64, config: &BalanceConfig) -> u64 {
    if hours_away <= 0 {
        return 0;
    }
    let hours = hours_away as u64;
    let mut gold = hours.saturating_mul(config.offline_gold_per_hour);
    if hours_away > config.long_absence_hours {
        gold = gold.saturating_add(config.long_absence_bonus_gold);
    }
    gold
}

/// Applies the offline reward and stamps `now` as the last login.
///
/// Call once per session start. A second call with the same `now` grants
/// nothing because the elapsed time is measured from the updated stamp.
/// A clock that went backwards grants nothing.
pub fn apply_offline_reward(
    state: &mut SaveState,
    now_epoch_ms: i64,
    config: &BalanceConfig,
) -> OfflineReport {
    let elapsed_ms = now_epoch_ms.saturating_sub(state.last_login_epoch_ms);
    let hours_away = if elapsed_ms > 0 {
        elapsed_ms / MS_PER_HOUR
    } else {
        0
    };

    let gold_granted = calculate_offline_gold(hours_away, config);
    state.gold = state.gold.saturating_add(gold_granted);
    state.last_login_epoch_ms = now_epoch_ms;

    if gold_granted > 0 {
        tracing::info!(hours_away, gold_granted, "offline reward granted");
    }

    OfflineReport {
        hours_away,
        gold_granted,
        long_absence_bonus: hours_away > config.long_absence_hours,
    }
}
