//! Recoverable gameplay failures surfaced to the presentation layer.

use crate::character::skills::SkillId;
use crate::items::types::ItemId;
use crate::quests::types::QuestId;
use thiserror::Error;

/// Errors returned by inventory, quest, character and battle operations.
///
/// None of these are fatal: the caller shows feedback and the state is
/// left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("item not owned: {0}")]
    ItemNotOwned(ItemId),

    #[error("item cannot be used: {0}")]
    ItemNotUsable(ItemId),

    #[error("no potion available")]
    NoPotionAvailable,

    #[error("quest not ready to turn in: {0}")]
    QuestNotReady(QuestId),

    #[error("quest already completed: {0}")]
    AlreadyCompleted(QuestId),

    #[error("quest not tracked: {0}")]
    UnknownQuest(QuestId),

    #[error("skill not learned: {0}")]
    SkillNotLearned(SkillId),

    #[error("not enough mp: need {needed}, have {have}")]
    NotEnoughMp { needed: u32, have: u32 },

    #[error("invalid action: {0}")]
    InvalidAction(&'static str),
}

/// Result type for gameplay operations.
pub type GameResult<T> = Result<T, GameError>;
