use chrono::{NaiveDateTime, TimeDelta};

use super::TIMESTAMP_FORMAT;

/// Shift a canonical timestamp by a signed number of seconds (device clock
/// offset), wrapping across day/month/year boundaries. No-op at zero. A
/// timestamp that does not parse back (garbage a tag rule passed through)
/// is returned unchanged rather than failing the file.
pub fn apply_delta(timestamp: &str, delta_seconds: i64) -> String {
    if delta_seconds == 0 {
        return timestamp.to_string();
    }
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(dt) => (dt + TimeDelta::seconds(delta_seconds))
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Some devices stamp midnight as hour "24". Rewrite the hour token to "00",
/// leaving minutes, seconds and the date untouched. The date is deliberately
/// not rolled forward; see DESIGN.md.
pub fn fix_midnight_hour24(timestamp: &str) -> String {
    match timestamp.split_once('_') {
        Some((date, time)) if time.starts_with("24") => format!("{date}_00{}", &time[2..]),
        _ => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_shifts_by_seconds() {
        assert_eq!(apply_delta("2023-01-15_14-30-00", 3600), "2023-01-15_15-30-00");
        assert_eq!(apply_delta("2023-01-15_14-30-00", -90), "2023-01-15_14-28-30");
    }

    #[test]
    fn zero_delta_is_identity() {
        assert_eq!(apply_delta("2023-01-15_14-30-00", 0), "2023-01-15_14-30-00");
        assert_eq!(apply_delta("not a timestamp", 0), "not a timestamp");
    }

    #[test]
    fn delta_wraps_calendar_boundaries() {
        assert_eq!(apply_delta("2023-12-31_23-59-30", 60), "2024-01-01_00-00-30");
        assert_eq!(apply_delta("2024-03-01_00-00-10", -20), "2024-02-29_23-59-50");
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        assert_eq!(apply_delta("9999-99-99_99-99-99", 3600), "9999-99-99_99-99-99");
    }

    #[test]
    fn hour_24_becomes_00_without_date_roll() {
        assert_eq!(fix_midnight_hour24("2023-01-15_24-05-10"), "2023-01-15_00-05-10");
    }

    #[test]
    fn other_hours_untouched() {
        assert_eq!(fix_midnight_hour24("2023-01-15_23-05-10"), "2023-01-15_23-05-10");
        assert_eq!(fix_midnight_hour24("2023-01-15_02-44-10"), "2023-01-15_02-44-10");
        assert_eq!(fix_midnight_hour24("no-underscore"), "no-underscore");
    }
}
