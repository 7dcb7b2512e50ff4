//! Time utilities: ISO-8601 date/time parsing and timezone-aware "today".

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Parse an IANA timezone name like "America/Chicago".
pub fn parse_tz(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse `HH:MM:SS[.ffffff]`, falling back to `HH:MM`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Whole seconds print as `HH:MM:SS`; fractions only when non-zero.
pub fn format_time(t: NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

/// The calendar date at `now` in `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Combine a local date and time in `tz` into UTC.
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>> {
    let ndt = date.and_time(time);
    let local_dt = tz
        .from_local_datetime(&ndt)
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("nonexistent local time (DST gap?): {ndt} {tz}"))?;
    Ok(local_dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_and_minutes_forms() {
        assert_eq!(parse_time("09:00:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(
            parse_time("09:30:15.250000"),
            NaiveTime::from_hms_milli_opt(9, 30, 15, 250)
        );
        assert_eq!(parse_time("nine"), None);
        assert_eq!(parse_time("25:00:00"), None);
    }

    #[test]
    fn formats_without_zero_fraction() {
        let t = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(format_time(t), "14:05:00");
    }

    #[test]
    fn rejects_non_iso_dates() {
        assert!(parse_date("2026-02-30").is_none());
        assert!(parse_date("02/16/2026").is_none());
        assert_eq!(parse_date("2026-02-16"), NaiveDate::from_ymd_opt(2026, 2, 16));
    }

    #[test]
    fn today_depends_on_timezone() {
        // 03:00 UTC is still the previous evening in Chicago.
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        let tz = parse_tz("America/Chicago").unwrap();
        assert_eq!(today_in(tz, now), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert_eq!(today_in(chrono_tz::UTC, now), NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
    }

    #[test]
    fn chicago_local_to_utc() {
        // Feb is CST (UTC-6)
        let tz = parse_tz("America/Chicago").unwrap();
        let utc = local_to_utc(
            NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
            tz,
        )
        .unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
    }

    #[test]
    fn invalid_timezone_is_error() {
        assert!(parse_tz("Mars/Olympus").is_err());
    }
}
