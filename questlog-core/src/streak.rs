//! Consecutive-day completion streak.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::task::Task;

/// Count consecutive calendar days with at least one completed task, ending
/// at `today` or the day before.
///
/// The walk starts at the most recent completion date and stops at the first
/// missing day; older runs behind a gap are not counted.
pub fn compute_streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let dates: BTreeSet<NaiveDate> = tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.date)
        .collect();

    let mut desc = dates.into_iter().rev();
    let Some(most_recent) = desc.next() else {
        return 0;
    };

    if (today - most_recent).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = most_recent;
    for d in desc {
        if (cursor - d).num_days() != 1 {
            break;
        }
        streak += 1;
        cursor = d;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()
    }

    fn done_days_ago(days: i64) -> Task {
        Task::new("q", today() - Duration::days(days)).completed(true)
    }

    #[test]
    fn empty_set_has_no_streak() {
        assert_eq!(compute_streak(&[], today()), 0);
    }

    #[test]
    fn pending_tasks_do_not_count() {
        let tasks = vec![Task::new("open", today())];
        assert_eq!(compute_streak(&tasks, today()), 0);
    }

    #[test]
    fn completed_today() {
        assert_eq!(compute_streak(&[done_days_ago(0)], today()), 1);
    }

    #[test]
    fn completed_yesterday_keeps_streak_alive() {
        assert_eq!(compute_streak(&[done_days_ago(1)], today()), 1);
    }

    #[test]
    fn stale_completion_breaks_streak() {
        assert_eq!(compute_streak(&[done_days_ago(2)], today()), 0);
        assert_eq!(compute_streak(&[done_days_ago(3)], today()), 0);
    }

    #[test]
    fn contiguous_days() {
        let tasks = vec![done_days_ago(0), done_days_ago(1)];
        assert_eq!(compute_streak(&tasks, today()), 2);
    }

    #[test]
    fn gap_stops_the_walk() {
        let tasks = vec![done_days_ago(0), done_days_ago(3)];
        assert_eq!(compute_streak(&tasks, today()), 1);

        // today, yesterday, then a hole, then a longer run: only the first run counts
        let tasks = vec![
            done_days_ago(0),
            done_days_ago(1),
            done_days_ago(3),
            done_days_ago(4),
            done_days_ago(5),
        ];
        assert_eq!(compute_streak(&tasks, today()), 2);
    }

    #[test]
    fn same_day_duplicates_count_once() {
        let tasks = vec![
            done_days_ago(0),
            done_days_ago(0),
            done_days_ago(1),
            done_days_ago(1),
            done_days_ago(2),
        ];
        assert_eq!(compute_streak(&tasks, today()), 3);
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let tasks = vec![done_days_ago(2), done_days_ago(0), done_days_ago(1)];
        assert_eq!(compute_streak(&tasks, today()), 3);
    }

    #[test]
    fn run_ending_yesterday() {
        let tasks = vec![done_days_ago(1), done_days_ago(2), done_days_ago(3)];
        assert_eq!(compute_streak(&tasks, today()), 3);
    }

    #[test]
    fn future_completion_counts_as_recent() {
        // a quest finished ahead of schedule still anchors the streak
        assert_eq!(compute_streak(&[done_days_ago(-2)], today()), 1);

        let tasks = vec![done_days_ago(-1), done_days_ago(0), done_days_ago(1)];
        assert_eq!(compute_streak(&tasks, today()), 3);

        // the walk starts at the future date, so the hole before today ends it
        let tasks = vec![done_days_ago(-3), done_days_ago(0)];
        assert_eq!(compute_streak(&tasks, today()), 1);
    }

    #[test]
    fn repeated_calls_agree() {
        let tasks = vec![done_days_ago(0), done_days_ago(1)];
        assert_eq!(compute_streak(&tasks, today()), compute_streak(&tasks, today()));
    }
}
