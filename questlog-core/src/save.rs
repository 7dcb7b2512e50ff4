//! Save file format.
//!
//! ```text
//! {
//!   "tasks": [ { "Title", "Description", "Date": "YYYY-MM-DD",
//!                "Start": "HH:MM:SS", "End": "HH:MM:SS", "Status", "Color" } ],
//!   "boss_xp": 0,
//!   "active_boss": null | { "Name", "MaxHP", "CurrentHP", "Image" }
//! }
//! ```
//!
//! Loading parses into a fresh [`SessionState`] first and only then commits,
//! so a bad file never leaves a half-restored session behind.

use serde::{Deserialize, Serialize};

use crate::boss::Boss;
use crate::error::LoadError;
use crate::progress::GameRules;
use crate::session::SessionState;
use crate::task::{is_valid_color, Task, DEFAULT_TASK_COLOR};
use crate::time::{format_date, format_time, parse_date, parse_time};

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    #[serde(default)]
    tasks: Option<Vec<TaskRecord>>,
    #[serde(default)]
    boss_xp: Option<u64>,
    #[serde(default)]
    active_boss: Option<Boss>,
}

/// One task row as written on disk. Dates and times stay strings here so a
/// bad value can be reported with its row and field.
#[derive(Debug, Serialize, Deserialize)]
struct TaskRecord {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Start")]
    start: String,
    #[serde(rename = "End")]
    end: String,
    #[serde(rename = "Status")]
    status: bool,
    #[serde(rename = "Color", default = "default_color")]
    color: String,
}

fn default_color() -> String {
    DEFAULT_TASK_COLOR.to_string()
}

impl From<&Task> for TaskRecord {
    fn from(t: &Task) -> Self {
        Self {
            title: t.title.clone(),
            description: t.description.clone(),
            date: format_date(t.date),
            start: format_time(t.start),
            end: format_time(t.end),
            status: t.completed,
            color: t.color.clone(),
        }
    }
}

impl TaskRecord {
    fn into_task(self, row: usize) -> Result<Task, LoadError> {
        let date = parse_date(&self.date).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: self.date.clone(),
        })?;
        let start = parse_time(&self.start).ok_or_else(|| LoadError::InvalidTime {
            row,
            field: "Start",
            value: self.start.clone(),
        })?;
        let end = parse_time(&self.end).ok_or_else(|| LoadError::InvalidTime {
            row,
            field: "End",
            value: self.end.clone(),
        })?;
        if !is_valid_color(&self.color) {
            return Err(LoadError::InvalidColor {
                row,
                value: self.color,
            });
        }

        Ok(Task {
            title: self.title,
            description: self.description,
            date,
            start,
            end,
            completed: self.status,
            color: self.color,
        })
    }
}

/// Serialize a session into the save format.
pub fn to_save_json(state: &SessionState) -> serde_json::Result<String> {
    let file = SaveFile {
        tasks: Some(state.tasks.iter().map(TaskRecord::from).collect()),
        boss_xp: Some(state.bonus_xp),
        active_boss: state.active_boss.clone(),
    };
    serde_json::to_string(&file)
}

/// Parse a save file into a new session.
///
/// Missing `boss_xp` is 0, missing `active_boss` is none, missing or empty
/// `tasks` is an empty list.
pub fn from_save_json(json: &str) -> Result<SessionState, LoadError> {
    let file: SaveFile = serde_json::from_str(json)?;

    let tasks = file
        .tasks
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(row, rec)| rec.into_task(row))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(boss) = &file.active_boss {
        if boss.max_hp <= 0 {
            return Err(LoadError::InvalidBoss {
                reason: format!("MaxHP must be positive, got {}", boss.max_hp),
            });
        }
    }

    tracing::debug!(tasks = tasks.len(), "save file parsed");
    Ok(SessionState {
        tasks,
        bonus_xp: file.boss_xp.unwrap_or(0),
        active_boss: file.active_boss,
        rules: GameRules::default(),
    })
}

impl SessionState {
    /// Replace this session with the contents of a save file. On error the
    /// session is left exactly as it was.
    ///
    /// A boss saved at or below 0 HP is settled right after the commit; the
    /// fallen boss is returned.
    pub fn restore_from_json(&mut self, json: &str) -> Result<Option<Boss>, LoadError> {
        let mut staged = from_save_json(json)?;
        staged.rules = self.rules;
        *self = staged;
        Ok(self.settle_boss())
    }

    pub fn to_save_json(&self) -> serde_json::Result<String> {
        to_save_json(self)
    }
}
