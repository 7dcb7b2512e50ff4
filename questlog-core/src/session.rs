//! Caller-owned session state and the update cycle.
//!
//! Every user action produces a new task snapshot. [`SessionState::apply_tasks`]
//! diffs it against the current one and turns newly completed tasks into XP
//! and boss damage.

use chrono::NaiveDate;

use crate::boss::{Boss, SUMMON_HP_RANGE};
use crate::error::SessionError;
use crate::progress::{GameRules, Stats};
use crate::streak::compute_streak;
use crate::task::{completed_count, is_valid_color, Task};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub tasks: Vec<Task>,
    /// XP banked from defeated bosses.
    pub bonus_xp: u64,
    pub active_boss: Option<Boss>,
    /// Not persisted; a loaded session keeps the rules of the one it replaces.
    pub rules: GameRules,
}

/// What one update cycle changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    pub newly_completed: u64,
    pub xp_gained: u64,
    /// `None` when no boss was hit.
    pub damage_dealt: Option<i64>,
    /// The boss as it was when it fell.
    pub defeated: Option<Boss>,
    pub bonus_awarded: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new session seeded with the starter quest.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            tasks: vec![Task::starter(today)],
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn stats(&self) -> Stats {
        self.rules.stats(&self.tasks, self.bonus_xp)
    }

    pub fn streak(&self, today: NaiveDate) -> u32 {
        compute_streak(&self.tasks, today)
    }

    /// Replace the task list with `new_tasks` and settle the consequences.
    ///
    /// Only an increase in the completed count deals damage; un-completing a
    /// task neither heals the boss nor takes bonus XP back.
    pub fn apply_tasks(&mut self, new_tasks: Vec<Task>) -> UpdateOutcome {
        let before = completed_count(&self.tasks);
        let after = completed_count(&new_tasks);
        self.tasks = new_tasks;

        let mut outcome = UpdateOutcome::default();
        if after > before {
            let hits = after - before;
            outcome.newly_completed = hits;
            outcome.xp_gained = hits * self.rules.xp_per_task;
            tracing::debug!(hits, xp = outcome.xp_gained, "quests completed");

            if let Some(boss) = self.active_boss.take() {
                let (boss, damage) = self.rules.deal_damage(boss, hits);
                outcome.damage_dealt = Some(damage);
                self.active_boss = Some(boss);
            }
        }

        if let Some(fallen) = self.settle_boss() {
            outcome.bonus_awarded = self.rules.boss_bonus_xp;
            outcome.defeated = Some(fallen);
        }
        outcome
    }

    /// If the active boss is at or below 0 HP, bank the defeat bonus and
    /// discard it. Returns the fallen boss.
    pub fn settle_boss(&mut self) -> Option<Boss> {
        if !self.active_boss.as_ref().is_some_and(Boss::is_defeated) {
            return None;
        }
        let fallen = self.active_boss.take()?;
        self.bonus_xp += self.rules.boss_bonus_xp;
        tracing::info!(boss = %fallen.name, bonus = self.rules.boss_bonus_xp, "boss defeated");
        Some(fallen)
    }

    /// Summon a boss at full health. Only one may be active.
    pub fn summon_boss(
        &mut self,
        name: impl Into<String>,
        hp: i64,
        icon: impl Into<String>,
    ) -> Result<&Boss, SessionError> {
        if let Some(active) = &self.active_boss {
            return Err(SessionError::BossAlreadyActive {
                name: active.name.clone(),
            });
        }
        if !SUMMON_HP_RANGE.contains(&hp) {
            return Err(SessionError::InvalidBossHp {
                hp,
                min: *SUMMON_HP_RANGE.start(),
                max: *SUMMON_HP_RANGE.end(),
            });
        }
        let boss = Boss::new(name, hp, icon);
        tracing::debug!(boss = %boss.name, hp, "boss summoned");
        Ok(&*self.active_boss.insert(boss))
    }

    /// Abandon the active boss without reward. `None` if there was none.
    pub fn flee(&mut self) -> Option<Boss> {
        self.active_boss.take()
    }

    /// The task list with `task` appended.
    pub fn with_task_added(&self, task: Task) -> Result<Vec<Task>, SessionError> {
        if !is_valid_color(&task.color) {
            return Err(SessionError::InvalidColor(task.color));
        }
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Ok(tasks)
    }

    /// The task list without row `index`.
    pub fn with_task_removed(&self, index: usize) -> Result<Vec<Task>, SessionError> {
        self.check_index(index)?;
        let mut tasks = self.tasks.clone();
        tasks.remove(index);
        Ok(tasks)
    }

    /// The task list with row `index` marked done or not done.
    pub fn with_completion(&self, index: usize, completed: bool) -> Result<Vec<Task>, SessionError> {
        self.check_index(index)?;
        let mut tasks = self.tasks.clone();
        tasks[index].completed = completed;
        Ok(tasks)
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.tasks.len() {
            return Err(SessionError::TaskIndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}
