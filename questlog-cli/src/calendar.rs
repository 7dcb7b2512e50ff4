use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use questlog_core::time::local_to_utc;
use questlog_core::Task;

const ICS_STAMP: &str = "%Y%m%dT%H%M%SZ";

/// Content lines longer than this many octets are folded.
const ICS_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Quest number, date and start time; stable while the log isn't reordered.
    pub uid: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    /// `#RRGGBB`, taken from the task.
    pub color: String,
    pub completed: bool,
}

/// One event per task, on the task's date in `tz`.
pub fn tasks_to_events(tasks: &[Task], tz: Tz) -> Result<Vec<CalendarEvent>> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let n = i + 1;
            let start_utc =
                local_to_utc(t.date, t.start, tz).with_context(|| format!("quest {n} start"))?;
            let end_utc =
                local_to_utc(t.date, t.end, tz).with_context(|| format!("quest {n} end"))?;
            Ok(CalendarEvent {
                uid: format!("quest{n}-{}@questlog", t.date.and_time(t.start).format("%Y%m%dT%H%M")),
                start_utc,
                end_utc,
                summary: format!("{} {}", if t.completed { "✅" } else { "⬜" }, t.title),
                description: t.description.clone(),
                color: t.color.clone(),
                completed: t.completed,
            })
        })
        .collect()
}

/// Render events as an RFC 5545 calendar: CRLF line endings, folded lines,
/// UTC times. `stamp` becomes every event's DTSTAMP.
pub fn events_to_ics(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//QuestLog//Quest Export//EN".to_string(),
        "X-WR-CALNAME:QuestLog".to_string(),
    ];
    let dtstamp = stamp.format(ICS_STAMP).to_string();

    for e in events {
        lines.push("BEGIN:VEVENT".into());
        lines.push(format!("UID:{}", e.uid));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!("DTSTART:{}", e.start_utc.format(ICS_STAMP)));
        lines.push(format!("DTEND:{}", e.end_utc.format(ICS_STAMP)));
        lines.push(format!("SUMMARY:{}", ics_text(&e.summary)));
        if !e.description.is_empty() {
            lines.push(format!("DESCRIPTION:{}", ics_text(&e.description)));
        }
        let state = if e.completed { "Done" } else { "Open" };
        lines.push(format!("CATEGORIES:QuestLog,{state}"));
        // Done quests don't block time in the user's calendar.
        if e.completed {
            lines.push("TRANSP:TRANSPARENT".into());
        }
        lines.push(format!("X-QUESTLOG-COLOR:{}", e.color));
        lines.push(format!("X-APPLE-CALENDAR-COLOR:{}", e.color));
        lines.push("END:VEVENT".into());
    }
    lines.push("END:VCALENDAR".into());

    let mut out = String::new();
    for line in &lines {
        fold_into(&mut out, line);
    }
    out
}

/// TEXT value escaping.
fn ics_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Append `line` with CRLF, continuing past 75 octets on a new line that
/// starts with a space. Never splits a UTF-8 sequence.
fn fold_into(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > ICS_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn chicago() -> Tz {
        "America/Chicago".parse().unwrap()
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap()
    }

    fn task() -> Task {
        Task::new("Gym, legs; squats", NaiveDate::from_ymd_opt(2026, 2, 20).unwrap())
            .with_times(
                NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(19, 15, 0).unwrap(),
            )
            .with_color("#33B679")
            .completed(true)
    }

    #[test]
    fn events_use_task_times_in_timezone() {
        let events = tasks_to_events(&[task()], chicago()).unwrap();
        assert_eq!(events.len(), 1);
        // CST is UTC-6 in February
        assert_eq!(events[0].start_utc.to_rfc3339(), "2026-02-21T00:00:00+00:00");
        assert_eq!(events[0].end_utc.to_rfc3339(), "2026-02-21T01:15:00+00:00");
        assert_eq!(events[0].summary, "✅ Gym, legs; squats");
        assert_eq!(events[0].color, "#33B679");
        assert!(events[0].completed);
    }

    #[test]
    fn uid_names_quest_and_local_start() {
        let later = task().with_times(
            NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        );
        let events = tasks_to_events(&[task(), later], chicago()).unwrap();
        assert_eq!(events[0].uid, "quest1-20260220T1800@questlog");
        assert_eq!(events[1].uid, "quest2-20260220T0730@questlog");
    }

    #[test]
    fn pending_task_gets_empty_box() {
        let t = task().completed(false);
        let events = tasks_to_events(&[t], chrono_tz::UTC).unwrap();
        assert!(events[0].summary.starts_with("⬜ "));
        assert!(!events[0].completed);
    }

    #[test]
    fn ics_has_utc_times_and_escaped_text() {
        let events = tasks_to_events(&[task()], chicago()).unwrap();
        let ics = events_to_ics(&events, stamp());
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("UID:quest1-20260220T1800@questlog\r\n"));
        assert!(ics.contains("DTSTAMP:20260219T120000Z\r\n"));
        assert!(ics.contains("DTSTART:20260221T000000Z\r\n"));
        assert!(ics.contains("DTEND:20260221T011500Z\r\n"));
        assert!(ics.contains("SUMMARY:✅ Gym\\, legs\\; squats\r\n"));
        assert!(!ics.contains("DESCRIPTION:"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn ics_carries_task_colour_and_state() {
        let done = task();
        let open = task().completed(false).with_color("#AA00FF");
        let events = tasks_to_events(&[done, open], chicago()).unwrap();
        let ics = events_to_ics(&events, stamp());

        assert!(ics.contains("X-QUESTLOG-COLOR:#33B679\r\n"));
        assert!(ics.contains("X-QUESTLOG-COLOR:#AA00FF\r\n"));
        assert!(ics.contains("X-APPLE-CALENDAR-COLOR:#AA00FF\r\n"));
        assert!(ics.contains("CATEGORIES:QuestLog,Done\r\n"));
        assert!(ics.contains("CATEGORIES:QuestLog,Open\r\n"));
        assert_eq!(ics.matches("TRANSP:TRANSPARENT").count(), 1);
    }

    #[test]
    fn long_lines_are_folded() {
        let t = task().with_description("é".repeat(60));
        let events = tasks_to_events(&[t], chicago()).unwrap();
        let ics = events_to_ics(&events, stamp());

        for line in ics.split("\r\n") {
            assert!(line.len() <= ICS_LINE_OCTETS, "{line:?} is {} octets", line.len());
        }
        let unfolded = ics.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("DESCRIPTION:{}\r\n", "é".repeat(60))));
    }

    #[test]
    fn multiline_description_is_escaped() {
        let t = task().with_description("sets:\r\n3x10");
        let events = tasks_to_events(&[t], chicago()).unwrap();
        let ics = events_to_ics(&events, stamp());
        assert!(ics.contains("DESCRIPTION:sets:\\n3x10\r\n"));
    }

    #[test]
    fn empty_log_is_empty_calendar() {
        let ics = events_to_ics(&[], stamp());
        assert!(!ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("X-WR-CALNAME:QuestLog\r\n"));
    }
}
