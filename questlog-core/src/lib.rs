//! questlog-core: gamification rules for the QuestLog task tracker
//!
//! XP and levels, completion streaks, boss combat, and the save file format.
//! Everything here is synchronous and holds no global state; the caller owns
//! a [`SessionState`] and passes it in.

pub mod boss;
pub mod error;
pub mod progress;
pub mod save;
pub mod session;
pub mod streak;
pub mod task;
pub mod time;

pub use boss::{
    deal_damage, Boss, DEFAULT_BOSS_HP, DEFAULT_BOSS_ICON, DEFAULT_BOSS_NAME, SUMMON_HP_RANGE,
};
pub use error::{LoadError, SessionError};
pub use progress::{
    compute_stats, GameRules, Stats, BOSS_BONUS_XP, BOSS_DMG_PER_TASK, LEVEL_BASE_XP, XP_PER_TASK,
};
pub use save::{from_save_json, to_save_json};
pub use session::{SessionState, UpdateOutcome};
pub use streak::compute_streak;
pub use task::{completed_count, is_valid_color, Task, DEFAULT_TASK_COLOR};
