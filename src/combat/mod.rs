//! Turn-based battles and random encounters.

pub mod encounter;
pub mod logic;
pub mod turn_queue;
pub mod types;

pub use encounter::{next_encounter_delay_ms, roll_encounter};
pub use logic::{
    ActionKind, Battle, BattleEvent, BattleOutcome, BattlePhase, BattleRewards, HeroAction,
    TurnResult,
};
pub use turn_queue::TurnQueue;
pub use types::{BattleUnit, EnemyKind, HeroSnapshot, Side};
