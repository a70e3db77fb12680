//! Inventory and equipment operations on the save state.

use super::types::{ItemEffect, ItemId, Slot};
use crate::character::progression::{heal, restore_mp};
use crate::core::balance::BalanceConfig;
use crate::core::error::{GameError, GameResult};
use crate::core::game_state::SaveState;

/// Outcome of consuming an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeResult {
    pub item: ItemId,
    pub hp_restored: u32,
    pub mp_restored: u32,
}

pub fn count(state: &SaveState, item: ItemId) -> usize {
    state.inventory.iter().filter(|i| **i == item).count()
}

pub fn owns(state: &SaveState, item: ItemId) -> bool {
    state.inventory.contains(&item)
}

/// Appends an item at the end of the display order.
pub fn add_item(state: &mut SaveState, item: ItemId) {
    state.inventory.push(item);
}

/// Puts an owned item into a slot, replacing whatever was there.
pub fn equip(state: &mut SaveState, slot: Slot, item: ItemId) -> GameResult<Option<ItemId>> {
    if !owns(state, item) {
        return Err(GameError::ItemNotOwned(item));
    }
    Ok(state.equipment.insert(slot, item))
}

/// Empties a slot, returning what was equipped.
pub fn unequip(state: &mut SaveState, slot: Slot) -> Option<ItemId> {
    state.equipment.remove(&slot)
}

/// Uses up one instance of an item and applies its effect.
///
/// Removes the first matching entry. Consuming the last copy of an
/// equipped item also clears its slot.
pub fn consume(
    state: &mut SaveState,
    item: ItemId,
    config: &BalanceConfig,
) -> GameResult<ConsumeResult> {
    let index = state
        .inventory
        .iter()
        .position(|i| *i == item)
        .ok_or(GameError::ItemNotOwned(item))?;
    let effect = item.effect().ok_or(GameError::ItemNotUsable(item))?;

    state.inventory.remove(index);
    if !owns(state, item) {
        state.equipment.retain(|_, equipped| *equipped != item);
    }

    let mut result = ConsumeResult {
        item,
        hp_restored: 0,
        mp_restored: 0,
    };
    match effect {
        ItemEffect::RestoreHp => result.hp_restored = heal(state, config.potion_heal),
        ItemEffect::RestoreMp => result.mp_restored = restore_mp(state, config.ether_restore),
    }
    tracing::debug!(%item, hp = state.hp, mp = state.mp, "item consumed");
    Ok(result)
}
