//! Quest tracking: kill counters with a one-time gold reward.

pub mod tracker;
pub mod types;

pub use tracker::{advance, advance_kill_quests, complete_and_reward, status};
pub use types::{Quest, QuestDef, QuestId, QuestStatus};
