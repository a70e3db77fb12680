// Timing
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;
pub const ENCOUNTER_MIN_DELAY_SECONDS: u64 = 10;
pub const ENCOUNTER_MAX_DELAY_SECONDS: u64 = 20;
pub const ENEMY_TURN_DELAY_MS: u64 = 1000;
pub const MS_PER_SECOND: u64 = 1000;
pub const MS_PER_HOUR: i64 = 3_600_000;

// Encounters
pub const ENCOUNTER_CHANCE: f64 = 0.3;

// Leveling
pub const EXP_PER_LEVEL: u64 = 200;
pub const MAX_HP_GROWTH: u32 = 30;

// Starting stats
pub const STARTING_HP: u32 = 100;
pub const STARTING_MP: u32 = 50;
pub const STARTING_MAP_ID: &str = "map1";

// Combat
pub const HERO_SPEED: u32 = 100;
pub const ENEMY_SPEED: u32 = 80;
pub const HERO_BASE_DAMAGE: u32 = 50;
pub const HERO_DAMAGE_PER_LEVEL: u32 = 10;
pub const ENEMY_ATTACK_DAMAGE: u32 = 30;
pub const SLIME_MAX_HP: u32 = 150;
pub const GOBLIN_MAX_HP: u32 = 180;

// Victory rewards
pub const VICTORY_EXP: u64 = 100;
pub const VICTORY_GOLD: u64 = 50;

// Consumables
pub const POTION_HEAL: u32 = 50;
pub const ETHER_RESTORE: u32 = 30;

// Skills: (mp cost, amount)
pub const POWER_STRIKE: (u32, u32) = (20, 40);
pub const MEND: (u32, u32) = (15, 40);
pub const POWER_STRIKE_UNLOCK_LEVEL: u32 = 2;
pub const MEND_UNLOCK_LEVEL: u32 = 3;

// Offline rewards
pub const OFFLINE_GOLD_PER_HOUR: u64 = 100;
pub const LONG_ABSENCE_HOURS: i64 = 24;
pub const LONG_ABSENCE_BONUS_GOLD: u64 = 1000;

// Quests: (target, reward gold)
pub const SLIME_QUEST: (u32, u64) = (5, 500);
pub const GOBLIN_QUEST: (u32, u64) = (3, 300);

// Save file envelope
pub const SAVE_VERSION_MAGIC: u64 = 0x4550_4943_5250_4701;
pub const SAVE_FILE_NAME: &str = "save.dat";
pub const BALANCE_FILE_NAME: &str = "balance.json";
pub const DATA_DIR_NAME: &str = ".epic-rpg";
