//! Items, equipment slots and inventory operations.

pub mod inventory;
pub mod types;

pub use inventory::{add_item, consume, count, equip, owns, unequip, ConsumeResult};
pub use types::{ItemEffect, ItemId, Slot};
