// crates/sincer-core/src/validate.rs - Input predicates shared by the store and the manager
//
// Names and dates arrive as free-form strings from two places: the command
// line and the YAML document on disk. Both go through the same predicates so
// that anything the manager accepts can be written out and read back.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Reserved syntax for move magnitudes (`u3`, `d10`, `umax`, `dmax`)
static MOVE_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ud](\d+|max)$").expect("move syntax regex is valid"));

/// Naive date-time layouts interpreted in the local timezone
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts interpreted as local midnight
const LOCAL_DATE_FORMATS: &[&str] = &["%m-%d-%Y", "%m/%d/%Y"];

/// Check whether a string can be used as a record name
///
/// A valid name is non-empty, compiles as a glob pattern (names double as
/// lookup patterns), and does not collide with the move syntax, which would
/// make `move <name> <u/d…>` ambiguous.
pub fn is_record_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if glob::Pattern::new(name).is_err() {
        return false;
    }
    !is_move_syntax(name)
}

/// Check whether a string matches the reserved `^[ud](\d+|max)$` syntax
pub fn is_move_syntax(value: &str) -> bool {
    MOVE_SYNTAX.is_match(value)
}

/// Parse a user- or file-supplied date into a UTC timestamp
///
/// The `now` keyword is not a date and is rejected here; only the manager's
/// command inputs understand it.
///
/// Accepted inputs, tried in order:
/// - RFC 3339 (`2024-04-13T10:30:00.000Z`, `2024-04-13T10:30:00+02:00`)
/// - RFC 2822 (`Sat, 13 Apr 2024 10:30:00 +0000`)
/// - ISO date-only (`2024-04-13`), read as UTC midnight
/// - naive date-times such as `2024-04-13 10:30` or `04-13-2024 10:30:00`,
///   read in the local timezone
/// - US date-only (`04-13-2024`, `04/13/2024`), read as local midnight
///
/// Returns `None` for anything else, including local times that fall into a
/// DST gap.
pub fn parse_since(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(naive);
        }
    }

    for format in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date.and_hms_opt(0, 0, 0).and_then(local_to_utc);
        }
    }

    None
}

/// Check whether a string would be accepted by [`parse_since`]
pub fn is_record_since(input: &str) -> bool {
    parse_since(input).is_some()
}

/// Check whether a name template contains an unescaped `$0` placeholder
pub fn is_name_template(template: &str) -> bool {
    let mut previous = None;
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'0') && previous != Some('\\') {
            return true;
        }
        previous = Some(ch);
    }
    false
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_record_names() {
        assert!(is_record_name("normal"));
        assert!(is_record_name("*"));
        assert!(is_record_name("\0"));
        assert!(is_record_name("timer-1"));
        assert!(is_record_name("u"));
        assert!(is_record_name("dmaxx"));

        assert!(!is_record_name(""));
        assert!(!is_record_name("[unclosed"));
        assert!(!is_record_name("u1"));
        assert!(!is_record_name("d42"));
        assert!(!is_record_name("umax"));
        assert!(!is_record_name("dmax"));
    }

    #[test]
    fn test_rfc3339_dates() {
        let parsed = parse_since("2024-04-13T10:30:00.000Z").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 10);

        let offset = parse_since("2024-04-13T10:30:00+02:00").unwrap();
        assert_eq!(offset.hour(), 8);
    }

    #[test]
    fn test_iso_date_only_is_utc_midnight() {
        let parsed = parse_since("2024-04-13").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-04-13T00:00:00+00:00");
    }

    #[test]
    fn test_local_formats_are_accepted() {
        assert!(is_record_since("04-13-2024 10:30:00"));
        assert!(is_record_since("04/13/2024 10:30"));
        assert!(is_record_since("2024-04-13 10:30"));
        assert!(is_record_since("04-13-2024"));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(!is_record_since(""));
        assert!(!is_record_since("   "));
        assert!(!is_record_since("yesterday"));
        assert!(!is_record_since("now"));
        assert!(!is_record_since("2024-13-45"));
        assert!(!is_record_since("d"));
    }

    #[test]
    fn test_name_templates() {
        assert!(!is_name_template("hello"));
        assert!(is_name_template("hello$0"));
        assert!(is_name_template("$0hello"));
        assert!(is_name_template("hello$0$0"));
        assert!(is_name_template("hello$0!"));
        assert!(is_name_template("\\$0-template$0"));
        assert!(!is_name_template("hello\\$0"));
    }
}
