//! Learnable battle skills.

use crate::core::balance::BalanceConfig;
use crate::core::game_state::SaveState;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    /// Attack with bonus damage.
    PowerStrike,
    /// Heal the hero.
    Mend,
}

impl SkillId {
    pub const ALL: [SkillId; 2] = [SkillId::PowerStrike, SkillId::Mend];

    pub fn name(&self) -> &'static str {
        match self {
            SkillId::PowerStrike => "power_strike",
            SkillId::Mend => "mend",
        }
    }

    pub fn mp_cost(&self, config: &BalanceConfig) -> u32 {
        match self {
            SkillId::PowerStrike => config.power_strike_mp_cost,
            SkillId::Mend => config.mend_mp_cost,
        }
    }

    /// Hero level at which the skill is learned.
    pub fn unlock_level(&self, config: &BalanceConfig) -> u32 {
        match self {
            SkillId::PowerStrike => config.power_strike_unlock_level,
            SkillId::Mend => config.mend_unlock_level,
        }
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Adds a skill to the learned set. Returns true if it was new.
pub fn learn_skill(state: &mut SaveState, skill: SkillId) -> bool {
    state.skills.insert(skill)
}

pub fn knows_skill(state: &SaveState, skill: SkillId) -> bool {
    state.skills.contains(&skill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learn_skill_once() {
        let mut state = SaveState::new(0);
        assert!(!knows_skill(&state, SkillId::Mend));

        assert!(learn_skill(&mut state, SkillId::Mend));
        assert!(!learn_skill(&mut state, SkillId::Mend));
        assert!(knows_skill(&state, SkillId::Mend));
        assert_eq!(state.skills.len(), 1);
    }

    #[test]
    fn test_mp_costs_follow_config() {
        let config = BalanceConfig::default();
        assert_eq!(SkillId::PowerStrike.mp_cost(&config), 20);
        assert_eq!(SkillId::Mend.mp_cost(&config), 15);
        assert_eq!(SkillId::PowerStrike.unlock_level(&config), 2);
        assert_eq!(SkillId::Mend.unlock_level(&config), 3);
    }
}
