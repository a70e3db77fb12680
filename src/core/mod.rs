//! Core game state, balance settings, timers and the play session.

pub mod balance;
pub mod constants;
pub mod error;
pub mod game_state;
pub mod offline;
pub mod scheduler;
pub mod session;

pub use balance::BalanceConfig;
pub use error::{GameError, GameResult};
pub use game_state::SaveState;
pub use offline::{apply_offline_reward, calculate_offline_gold, OfflineReport};
pub use scheduler::{Scheduler, TaskId, TaskKind};
pub use session::{Mode, Session, SessionEvent};
