//! Error types for the load boundary and session actions.
//!
//! The calculators themselves are total; only restoring a save file and
//! validating user-supplied actions can fail.

use thiserror::Error;

/// A save file could not be turned into a session.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Not JSON, or the JSON does not have the expected shape.
    #[error("malformed save file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("task {row}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("task {row}: invalid {field} time '{value}' (expected HH:MM:SS)")]
    InvalidTime {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("task {row}: invalid color '{value}' (expected #RRGGBB)")]
    InvalidColor { row: usize, value: String },

    #[error("active boss is invalid: {reason}")]
    InvalidBoss { reason: String },
}

/// A session action was rejected before any state changed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("a boss is already active: {name}")]
    BossAlreadyActive { name: String },

    #[error("boss HP {hp} is outside {min}..={max}")]
    InvalidBossHp { hp: i64, min: i64, max: i64 },

    #[error("no task at index {index} (have {len})")]
    TaskIndexOutOfRange { index: usize, len: usize },

    #[error("invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),
}
