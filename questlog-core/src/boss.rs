//! Boss entity and combat math.
//!
//! Damage only moves HP. Deciding what a defeat is worth, and discarding the
//! boss afterwards, belongs to the session layer.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::progress::GameRules;

/// HP a boss may be summoned with.
pub const SUMMON_HP_RANGE: RangeInclusive<i64> = 50..=500;

pub const DEFAULT_BOSS_NAME: &str = "Entropy Dragon";
pub const DEFAULT_BOSS_HP: i64 = 100;
pub const DEFAULT_BOSS_ICON: &str = "🐉";

/// Field names match the persisted save format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MaxHP")]
    pub max_hp: i64,
    /// Can go negative; see [`Boss::is_defeated`].
    #[serde(rename = "CurrentHP")]
    pub current_hp: i64,
    #[serde(rename = "Image")]
    pub icon: String,
}

impl Boss {
    /// A fresh boss at full health.
    pub fn new(name: impl Into<String>, hp: i64, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_hp: hp,
            current_hp: hp,
            icon: icon.into(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0
    }

    /// Remaining health for an HP bar, floored at 0.
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.current_hp as f64 / self.max_hp as f64).max(0.0)
    }
}

impl GameRules {
    /// Apply `hit_count` hits at `boss_dmg_per_task` each. HP is not clamped.
    pub fn deal_damage(&self, mut boss: Boss, hit_count: u64) -> (Boss, i64) {
        let damage = hit_count as i64 * self.boss_dmg_per_task;
        boss.current_hp -= damage;
        tracing::debug!(boss = %boss.name, damage, hp = boss.current_hp, "boss hit");
        (boss, damage)
    }
}

/// Apply `hit_count` hits, returning the updated boss and the damage dealt.
pub fn deal_damage(boss: Boss, hit_count: u64) -> (Boss, i64) {
    GameRules::default().deal_damage(boss, hit_count)
}
