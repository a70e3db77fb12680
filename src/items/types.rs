use serde::{Deserialize, Serialize};
use std::fmt;

/// Every item the hero can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    Sword,
    Potion,
    Ether,
}

/// Equipment slots. Only the weapon slot exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Weapon,
}

/// What happens when an item is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    RestoreHp,
    RestoreMp,
}

impl ItemId {
    pub const ALL: [ItemId; 3] = [ItemId::Sword, ItemId::Potion, ItemId::Ether];

    pub fn name(&self) -> &'static str {
        match self {
            ItemId::Sword => "sword",
            ItemId::Potion => "potion",
            ItemId::Ether => "ether",
        }
    }

    /// Parses the lowercase key used by the browser build.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.name() == key)
    }

    /// Consumable effect, `None` for gear.
    pub fn effect(&self) -> Option<ItemEffect> {
        match self {
            ItemId::Sword => None,
            ItemId::Potion => Some(ItemEffect::RestoreHp),
            ItemId::Ether => Some(ItemEffect::RestoreMp),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_matches_names() {
        for item in ItemId::ALL {
            assert_eq!(ItemId::from_key(item.name()), Some(item));
        }
        assert_eq!(ItemId::from_key("shield"), None);
    }

    #[test]
    fn test_only_consumables_have_effects() {
        assert_eq!(ItemId::Sword.effect(), None);
        assert_eq!(ItemId::Potion.effect(), Some(ItemEffect::RestoreHp));
        assert_eq!(ItemId::Ether.effect(), Some(ItemEffect::RestoreMp));
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        assert_eq!(serde_json::to_string(&ItemId::Potion).unwrap(), "\"potion\"");
        assert_eq!(serde_json::to_string(&Slot::Weapon).unwrap(), "\"weapon\"");
    }
}
