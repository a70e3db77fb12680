//! Tunable balance numbers shared by the battle engine, character model,
//! offline rewards and the session timers.
//!
//! Defaults come from [`crate::core::constants`]. A JSON file in the
//! `~/.epic-rpg/` directory may override any subset of fields; anything
//! missing keeps its default.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    // =========================================================================
    // LEVELING
    // =========================================================================
    /// A level-up happens while `exp >= level * exp_per_level`.
    pub exp_per_level: u64,
    /// Max HP gained per level.
    pub max_hp_growth: u32,
    /// Refill MP on level-up as well as HP.
    pub restore_mp_on_level_up: bool,

    // =========================================================================
    // COMBAT
    // =========================================================================
    pub hero_speed: u32,
    pub enemy_speed: u32,
    /// Hero attack = hero_base_damage + level * hero_damage_per_level.
    pub hero_base_damage: u32,
    pub hero_damage_per_level: u32,
    pub enemy_attack_damage: u32,
    pub slime_max_hp: u32,
    pub goblin_max_hp: u32,
    pub victory_exp: u64,
    pub victory_gold: u64,

    // =========================================================================
    // ITEMS & SKILLS
    // =========================================================================
    pub potion_heal: u32,
    pub ether_restore: u32,
    pub power_strike_mp_cost: u32,
    pub power_strike_bonus_damage: u32,
    pub mend_mp_cost: u32,
    pub mend_heal: u32,
    /// Level at which each skill is learned.
    pub power_strike_unlock_level: u32,
    pub mend_unlock_level: u32,

    // =========================================================================
    // OFFLINE REWARDS
    // =========================================================================
    pub offline_gold_per_hour: u64,
    /// Absences strictly longer than this many hours earn the bonus.
    pub long_absence_hours: i64,
    pub long_absence_bonus_gold: u64,

    // =========================================================================
    // TIMERS
    // =========================================================================
    pub autosave_interval_ms: u64,
    pub encounter_chance: f64,
    pub encounter_min_delay_ms: u64,
    pub encounter_max_delay_ms: u64,
    pub enemy_turn_delay_ms: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            exp_per_level: EXP_PER_LEVEL,
            max_hp_growth: MAX_HP_GROWTH,
            restore_mp_on_level_up: true,
            hero_speed: HERO_SPEED,
            enemy_speed: ENEMY_SPEED,
            hero_base_damage: HERO_BASE_DAMAGE,
            hero_damage_per_level: HERO_DAMAGE_PER_LEVEL,
            enemy_attack_damage: ENEMY_ATTACK_DAMAGE,
            slime_max_hp: SLIME_MAX_HP,
            goblin_max_hp: GOBLIN_MAX_HP,
            victory_exp: VICTORY_EXP,
            victory_gold: VICTORY_GOLD,
            potion_heal: POTION_HEAL,
            ether_restore: ETHER_RESTORE,
            power_strike_mp_cost: POWER_STRIKE.0,
            power_strike_bonus_damage: POWER_STRIKE.1,
            mend_mp_cost: MEND.0,
            mend_heal: MEND.1,
            power_strike_unlock_level: POWER_STRIKE_UNLOCK_LEVEL,
            mend_unlock_level: MEND_UNLOCK_LEVEL,
            offline_gold_per_hour: OFFLINE_GOLD_PER_HOUR,
            long_absence_hours: LONG_ABSENCE_HOURS,
            long_absence_bonus_gold: LONG_ABSENCE_BONUS_GOLD,
            autosave_interval_ms: AUTOSAVE_INTERVAL_SECONDS * MS_PER_SECOND,
            encounter_chance: ENCOUNTER_CHANCE,
            encounter_min_delay_ms: ENCOUNTER_MIN_DELAY_SECONDS * MS_PER_SECOND,
            encounter_max_delay_ms: ENCOUNTER_MAX_DELAY_SECONDS * MS_PER_SECOND,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
        }
    }
}

impl BalanceConfig {
    /// Path of `~/.epic-rpg/balance.json`. Creates the directory if needed.
    pub fn default_path() -> io::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine home directory")
        })?;
        let dir = home.join(DATA_DIR_NAME);
        fs::create_dir_all(&dir)?;
        Ok(dir.join(BALANCE_FILE_NAME))
    }

    /// Loads `~/.epic-rpg/balance.json`, falling back to defaults.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("No balance directory, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Reads overrides from `path`. A missing file gives the defaults; an
    /// unreadable one is logged and also gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Writes these values to `~/.epic-rpg/balance.json` as a starting
    /// point for hand edits.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Hero attack damage at the given level.
    pub fn hero_attack_damage(&self, level: u32) -> u32 {
        self.hero_base_damage
            .saturating_add(level.saturating_mul(self.hero_damage_per_level))
    }

    /// Total exp needed to leave `level`.
    pub fn exp_threshold(&self, level: u32) -> u64 {
        u64::from(level).saturating_mul(self.exp_per_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_balance_path() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "epic-rpg-balance-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&dir).unwrap();
        dir.join(BALANCE_FILE_NAME)
    }

    #[test]
    fn test_hero_attack_damage_level_one() {
        let config = BalanceConfig::default();
        assert_eq!(config.hero_attack_damage(1), 60);
        assert_eq!(config.hero_attack_damage(5), 100);
    }

    #[test]
    fn test_exp_threshold_scales_with_level() {
        let config = BalanceConfig::default();
        assert_eq!(config.exp_threshold(1), 200);
        assert_eq!(config.exp_threshold(3), 600);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: BalanceConfig =
            serde_json::from_str(r#"{ "victory_gold": 75, "encounter_chance": 0.5 }"#).unwrap();

        assert_eq!(config.victory_gold, 75);
        assert!((config.encounter_chance - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.victory_exp, 100);
        assert_eq!(config.autosave_interval_ms, 30_000);
    }

    #[test]
    fn test_timer_defaults() {
        let config = BalanceConfig::default();
        assert_eq!(config.encounter_min_delay_ms, 10_000);
        assert_eq!(config.encounter_max_delay_ms, 20_000);
        assert_eq!(config.enemy_turn_delay_ms, 1000);
    }

    #[test]
    fn test_save_then_load_keeps_overrides() {
        let path = temp_balance_path();
        let config = BalanceConfig {
            victory_gold: 99,
            mend_unlock_level: 5,
            ..Default::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(BalanceConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_balance_path();
        assert_eq!(BalanceConfig::load_from(&path), BalanceConfig::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_balance_path();
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(BalanceConfig::load_from(&path), BalanceConfig::default());
    }

    #[test]
    fn test_default_path_is_under_data_dir() {
        let path = BalanceConfig::default_path().unwrap();
        assert!(path.ends_with(Path::new(DATA_DIR_NAME).join(BALANCE_FILE_NAME)));
    }
}
