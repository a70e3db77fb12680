use crate::core::balance::BalanceConfig;
use crate::core::game_state::SaveState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enemy species that can appear in the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Slime,
    Goblin,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Slime, EnemyKind::Goblin];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Slime => "slime",
            EnemyKind::Goblin => "goblin",
        }
    }

    pub fn max_hp(&self, config: &BalanceConfig) -> u32 {
        match self {
            EnemyKind::Slime => config.slime_max_hp,
            EnemyKind::Goblin => config.goblin_max_hp,
        }
    }

    /// Builds the battle unit for a freshly spawned enemy.
    pub fn spawn(&self, config: &BalanceConfig) -> BattleUnit {
        BattleUnit::new(
            Side::Enemy,
            self.max_hp(config),
            config.enemy_speed,
            config.enemy_attack_damage,
        )
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Hero,
    Enemy,
}

/// A combatant for the duration of one battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleUnit {
    pub side: Side,
    pub current_hp: u32,
    pub max_hp: u32,
    pub speed: u32,
    pub attack_power: u32,
}

impl BattleUnit {
    pub fn new(side: Side, max_hp: u32, speed: u32, attack_power: u32) -> Self {
        Self {
            side,
            current_hp: max_hp,
            max_hp,
            speed,
            attack_power,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_sub(amount);
        before - self.current_hp
    }
}

/// Hero stats captured when a battle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroSnapshot {
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
}

impl HeroSnapshot {
    pub fn from_state(state: &SaveState) -> Self {
        Self {
            level: state.level,
            hp: state.hp,
            max_hp: state.max_hp,
        }
    }

    pub fn to_unit(&self, config: &BalanceConfig) -> BattleUnit {
        BattleUnit {
            side: Side::Hero,
            current_hp: self.hp,
            max_hp: self.max_hp,
            speed: config.hero_speed,
            attack_power: config.hero_attack_damage(self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slime_spawn_uses_baseline_stats() {
        let unit = EnemyKind::Slime.spawn(&BalanceConfig::default());
        assert_eq!(unit.side, Side::Enemy);
        assert_eq!((unit.current_hp, unit.max_hp), (150, 150));
        assert_eq!(unit.speed, 80);
        assert_eq!(unit.attack_power, 30);
    }

    #[test]
    fn test_unit_take_damage_saturates() {
        let mut unit = EnemyKind::Goblin.spawn(&BalanceConfig::default());
        assert_eq!(unit.take_damage(100), 100);
        assert_eq!(unit.take_damage(500), 80);
        assert_eq!(unit.current_hp, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_hero_snapshot_unit() {
        let state = SaveState::new(0);
        let unit = HeroSnapshot::from_state(&state).to_unit(&BalanceConfig::default());
        assert_eq!(unit.side, Side::Hero);
        assert_eq!(unit.speed, 100);
        assert_eq!(unit.attack_power, 60);
        assert_eq!(unit.current_hp, 100);
    }
}
