//! Task model: one row of the quest log.
//!
//! Identity is positional. The calculators only ever read `date` and
//! `completed`; everything else is carried for display and persistence.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Colour given to tasks created without one.
pub const DEFAULT_TASK_COLOR: &str = "#3788d8";

/// Colour of the starter quest seeded into a fresh session.
pub const STARTER_TASK_COLOR: &str = "#33B679";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub completed: bool,
    /// `#RRGGBB`.
    pub color: String,
}

impl Task {
    /// A pending task on `date`, 09:00–10:00, default colour.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            start: default_start(),
            end: default_end(),
            completed: false,
            color: DEFAULT_TASK_COLOR.to_string(),
        }
    }

    /// The example quest a fresh session starts with.
    pub fn starter(today: NaiveDate) -> Self {
        Self::new("Install QuestLog", today)
            .with_description("cargo install questlog-cli")
            .with_color(STARTER_TASK_COLOR)
            .completed(true)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Number of completed tasks. Order does not matter; an empty set is 0.
pub fn completed_count(tasks: &[Task]) -> u64 {
    tasks.iter().filter(|t| t.completed).count() as u64
}

/// True for `#RRGGBB` hex colours.
pub fn is_valid_color(color: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static regex"))
        .is_match(color)
}
