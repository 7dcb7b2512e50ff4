//! Experience and leveling.
//!
//! XP is never stored: it is derived from the completed-task count plus the
//! bonus XP banked from defeated bosses.

use std::num::NonZeroU64;

use crate::task::{completed_count, Task};

/// XP awarded per completed task.
pub const XP_PER_TASK: u64 = 50;
/// XP span of one level.
pub const LEVEL_BASE_XP: u64 = 500;
/// Boss HP removed per newly completed task.
pub const BOSS_DMG_PER_TASK: i64 = 10;
/// Bonus XP banked when a boss is defeated.
pub const BOSS_BONUS_XP: u64 = 500;

const LEVEL_BASE: NonZeroU64 = match NonZeroU64::new(LEVEL_BASE_XP) {
    Some(n) => n,
    None => panic!("LEVEL_BASE_XP must be non-zero"),
};

/// The game constants as one value. A session carries one of these and every
/// XP, level and combat figure is derived through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub xp_per_task: u64,
    /// Non-zero so level math can never divide by zero.
    pub level_base_xp: NonZeroU64,
    pub boss_dmg_per_task: i64,
    pub boss_bonus_xp: u64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            xp_per_task: XP_PER_TASK,
            level_base_xp: LEVEL_BASE,
            boss_dmg_per_task: BOSS_DMG_PER_TASK,
            boss_bonus_xp: BOSS_BONUS_XP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub xp: u64,
    /// Always >= 1.
    pub level: u64,
    /// Fraction of the current level, in `[0, 1)`.
    pub progress: f64,
    /// XP at which the current level ends (shown as "xp / cap").
    pub level_cap_xp: u64,
}

impl GameRules {
    pub fn stats(&self, tasks: &[Task], bonus_xp: u64) -> Stats {
        self.stats_for_xp(completed_count(tasks) * self.xp_per_task + bonus_xp)
    }

    pub fn stats_for_xp(&self, xp: u64) -> Stats {
        let base = self.level_base_xp.get();
        let level = xp / base + 1;
        Stats {
            xp,
            level,
            progress: (xp % base) as f64 / base as f64,
            level_cap_xp: level * base,
        }
    }
}

/// Derive XP, level and level progress from the task set and banked bonus.
pub fn compute_stats(tasks: &[Task], bonus_xp: u64) -> Stats {
    GameRules::default().stats(tasks, bonus_xp)
}
