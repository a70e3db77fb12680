//! Hero stats, skills and the save file.

pub mod progression;
pub mod save;
pub mod skills;

pub use progression::{gain_exp, heal, is_alive, restore_mp, spend_mp, take_damage};
pub use save::{SaveError, SaveManager, SaveResult};
pub use skills::{knows_skill, learn_skill, SkillId};
