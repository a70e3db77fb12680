use super::constants::{STARTING_HP, STARTING_MAP_ID, STARTING_MP};
use crate::character::skills::SkillId;
use crate::items::types::{ItemId, Slot};
use crate::quests::types::{Quest, QuestId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The persistent progression record. One value per session, owned by the
/// caller and threaded through every component by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub level: u32,
    /// Cumulative experience; level-ups do not spend it.
    pub exp: u64,
    pub gold: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    /// Display order is insertion order; duplicates allowed.
    pub inventory: Vec<ItemId>,
    pub equipment: BTreeMap<Slot, ItemId>,
    pub skills: BTreeSet<SkillId>,
    pub quests: BTreeMap<QuestId, Quest>,
    pub completed_quest_ids: BTreeSet<QuestId>,
    pub current_map_id: String,
    pub last_login_epoch_ms: i64,
    pub playtime_seconds: u64,
}

impl SaveState {
    /// First-run state.
    pub fn new(now_epoch_ms: i64) -> Self {
        let quests = QuestId::ALL
            .into_iter()
            .map(|id| (id, Quest::from_def(&id.def())))
            .collect();

        Self {
            level: 1,
            exp: 0,
            gold: 0,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            mp: STARTING_MP,
            max_mp: STARTING_MP,
            inventory: vec![ItemId::Sword, ItemId::Potion],
            equipment: BTreeMap::from([(Slot::Weapon, ItemId::Sword)]),
            skills: BTreeSet::new(),
            quests,
            completed_quest_ids: BTreeSet::new(),
            current_map_id: STARTING_MAP_ID.to_string(),
            last_login_epoch_ms: now_epoch_ms,
            playtime_seconds: 0,
        }
    }

    pub fn equipped(&self, slot: Slot) -> Option<ItemId> {
        self.equipment.get(&slot).copied()
    }

    pub fn quest(&self, id: QuestId) -> Option<&Quest> {
        self.quests.get(&id)
    }

    /// Repairs values a hand-edited or migrated save could violate.
    pub fn clamp_invariants(&mut self) {
        self.level = self.level.max(1);
        self.hp = self.hp.min(self.max_hp);
        self.mp = self.mp.min(self.max_mp);
        for quest in self.quests.values_mut() {
            quest.target = quest.target.max(1);
            quest.progress = quest.progress.min(quest.target);
        }
    }
}
