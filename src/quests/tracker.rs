//! Quest progress and one-time reward payout.

use super::types::{QuestId, QuestStatus};
use crate::combat::types::EnemyKind;
use crate::core::error::{GameError, GameResult};
use crate::core::game_state::SaveState;

/// Advances a quest by `delta`, clamped at its target.
///
/// No-op for untracked, already complete or already turned-in quests.
/// Returns true if progress changed.
pub fn advance(state: &mut SaveState, id: QuestId, delta: u32) -> bool {
    if state.completed_quest_ids.contains(&id) {
        return false;
    }
    let Some(quest) = state.quests.get_mut(&id) else {
        return false;
    };
    if quest.is_complete() {
        return false;
    }
    quest.progress = quest.progress.saturating_add(delta).min(quest.target);
    tracing::debug!(
        quest = %id,
        progress = quest.progress,
        target = quest.target,
        "quest advanced"
    );
    true
}

/// Advances every quest that tracks the defeated enemy kind.
/// Returns the quests whose progress changed.
pub fn advance_kill_quests(state: &mut SaveState, enemy: EnemyKind) -> Vec<QuestId> {
    QuestId::ALL
        .into_iter()
        .filter(|id| id.def().tracks == enemy)
        .filter(|id| advance(state, *id, 1))
        .collect()
}

/// Grants the reward for a finished quest and records its completion.
///
/// Succeeds at most once per quest; repeat calls (e.g. talking to the
/// quest giver again) fail with `AlreadyCompleted` and grant nothing.
pub fn complete_and_reward(state: &mut SaveState, id: QuestId, reward_gold: u64) -> GameResult<()> {
    if state.completed_quest_ids.contains(&id) {
        return Err(GameError::AlreadyCompleted(id));
    }
    let quest = state.quests.get(&id).ok_or(GameError::UnknownQuest(id))?;
    if !quest.is_complete() {
        return Err(GameError::QuestNotReady(id));
    }

    state.gold = state.gold.saturating_add(reward_gold);
    state.completed_quest_ids.insert(id);
    tracing::info!(quest = %id, reward_gold, "quest completed");
    Ok(())
}

/// Dialogue-facing view of a quest. `None` if the quest is not tracked.
pub fn status(state: &SaveState, id: QuestId) -> Option<QuestStatus> {
    if state.completed_quest_ids.contains(&id) {
        return Some(QuestStatus::Completed);
    }
    state.quests.get(&id).map(|quest| {
        if quest.is_complete() {
            QuestStatus::ReadyToTurnIn
        } else {
            QuestStatus::InProgress {
                progress: quest.progress,
                target: quest.target,
            }
        }
    })
}
