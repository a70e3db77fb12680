//! Epic RPG - Idle RPG Game Core
//!
//! Everything below the presentation layer: save state, battles, items,
//! quests, offline rewards and the timers that drive a session.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod quests;

pub use crate::core::{BalanceConfig, GameError, GameResult, SaveState, Session, SessionEvent};
