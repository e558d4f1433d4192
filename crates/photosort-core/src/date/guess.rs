use chrono::{NaiveDate, NaiveDateTime};

use super::{DateResult, Provenance, TIMESTAMP_FORMAT};

/// Filename templates in match order, covering common device and app naming
/// conventions. Order is the disambiguation policy: more specific shapes sit
/// before the general ones and the first strict parse wins. Do not reorder.
pub const NAME_FORMATS: &[&str] = &[
    "%Y%m%d_%H%M%S",
    "%Y-%m-%d_%H.%M.%S",
    "%Y-%m-%d_%H-%M-%S",
    "IMG_%Y%m%d_%H%M%S",
    "Screenshot_%Y-%m-%d-%H-%M-%S",
    "Screenshot_%Y%m%d-%H%M%S",
    "MVIMG_%Y%m%d_%H%M%S",
    "VID_%Y%m%d_%H%M%S",
    "IMG_%Y%m%d",
    "%Y%m%d_%H%M%S",
    "VID-%Y%m%d-WA",
    "IMG-%Y%m%d-WA",
    "YIP_%Y%m%d_%H%M%S",
    "%Y-%m-%d %H-%M-%S",
];

/// Exact character width a template expects: 4 for a year directive, 2 for
/// every other directive, 1 per literal character.
fn format_width(format: &str) -> usize {
    let mut width = 0;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.next() {
                Some('Y') => width += 4,
                Some(_) => width += 2,
                None => {}
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Strict parse against one template. Date-only templates (no time
/// directives) default to midnight.
fn parse_strict(input: &str, format: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(input, format)
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// Guess a timestamp from a filename stem: for each template, slice exactly
/// its expected width off the front of the stem and strict-parse. Trailing
/// stem characters beyond the slice (WhatsApp counters, ` (1)` copies) never
/// disturb the match.
pub fn guess_date_from_filename(stem: &str) -> Option<DateResult> {
    for &format in NAME_FORMATS {
        let head: String = stem.chars().take(format_width(format)).collect();
        if let Some(dt) = parse_strict(&head, format) {
            return Some(DateResult {
                timestamp: dt.format(TIMESTAMP_FORMAT).to_string(),
                source: Provenance::Filename(format),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(stem: &str) -> Option<String> {
        guess_date_from_filename(stem).map(|r| r.timestamp)
    }

    #[test]
    fn test_guess_patterns() {
        assert_eq!(guess("IMG_20230115_143000"), Some("2023-01-15_14-30-00".into()));
        assert_eq!(
            guess("Screenshot_2023-01-15-14-30-00"),
            Some("2023-01-15_14-30-00".into())
        );
        assert_eq!(guess("20190509_154733"), Some("2019-05-09_15-47-33".into()));
        assert_eq!(guess("VID_20211231_235959"), Some("2021-12-31_23-59-59".into()));
        assert_eq!(guess("2016-01-30_11.49.15"), Some("2016-01-30_11-49-15".into()));
        assert!(guess("random_photo").is_none());
    }

    #[test]
    fn date_only_templates_default_to_midnight() {
        assert_eq!(guess("IMG_20230115"), Some("2023-01-15_00-00-00".into()));
        assert_eq!(guess("IMG-20230115-WA0007"), Some("2023-01-15_00-00-00".into()));
    }

    #[test]
    fn trailing_characters_beyond_the_slice_are_ignored() {
        assert_eq!(
            guess("IMG_20230115_143000_edited(1)"),
            Some("2023-01-15_14-30-00".into())
        );
    }

    #[test]
    fn short_stems_do_not_match() {
        assert!(guess("2023011").is_none());
        assert!(guess("").is_none());
    }

    #[test]
    fn invalid_calendar_components_are_rejected() {
        assert!(guess("IMG_20231345_256199").is_none());
    }

    #[test]
    fn widths_count_year_as_four_and_literals_as_one() {
        assert_eq!(format_width("%Y%m%d_%H%M%S"), 15);
        assert_eq!(format_width("IMG_%Y%m%d"), 12);
        assert_eq!(format_width("Screenshot_%Y-%m-%d-%H-%M-%S"), 30);
    }
}
