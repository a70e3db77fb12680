//! Quest data: identifiers, static definitions and tracked progress.

use crate::combat::types::EnemyKind;
use crate::core::constants::{GOBLIN_QUEST, SLIME_QUEST};
use crate::items::types::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for each quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestId {
    /// Village elder: slay 5 slimes.
    Slimes,
    /// Slay 3 goblins.
    Goblins,
}

/// Static description of a quest.
#[derive(Debug, Clone, Copy)]
pub struct QuestDef {
    pub id: QuestId,
    pub display_name: &'static str,
    pub target: u32,
    pub reward_gold: u64,
    /// Item handed over with the gold, if any.
    pub reward_item: Option<ItemId>,
    /// Defeating this enemy kind advances the quest.
    pub tracks: EnemyKind,
}

impl QuestId {
    pub const ALL: [QuestId; 2] = [QuestId::Slimes, QuestId::Goblins];

    pub fn name(&self) -> &'static str {
        match self {
            QuestId::Slimes => "slimes",
            QuestId::Goblins => "goblins",
        }
    }

    pub fn def(&self) -> QuestDef {
        match self {
            QuestId::Slimes => QuestDef {
                id: *self,
                display_name: "Slay 5 slimes",
                target: SLIME_QUEST.0,
                reward_gold: SLIME_QUEST.1,
                reward_item: Some(ItemId::Ether),
                tracks: EnemyKind::Slime,
            },
            QuestId::Goblins => QuestDef {
                id: *self,
                display_name: "Slay 3 goblins",
                target: GOBLIN_QUEST.0,
                reward_gold: GOBLIN_QUEST.1,
                reward_item: Some(ItemId::Potion),
                tracks: EnemyKind::Goblin,
            },
        }
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracked progress for one quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub display_name: String,
    pub progress: u32,
    pub target: u32,
}

impl Quest {
    /// Fresh tracker for a defined quest.
    pub fn from_def(def: &QuestDef) -> Self {
        Self {
            id: def.id,
            display_name: def.display_name.to_string(),
            progress: 0,
            target: def.target.max(1),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }
}

/// What dialogue should show for a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStatus {
    InProgress { progress: u32, target: u32 },
    ReadyToTurnIn,
    Completed,
}
