//! Day and rotating-week arithmetic for the posting calendar.

use jiff::civil::{Date, Weekday};

/// Schedule key for the week containing `date`: `week1` through `week4`.
///
/// Rotates on the ISO week number; weeks divisible by four map to `week4`.
pub fn week_key(date: Date) -> String {
    let n = i32::from(date.iso_week_date().week()) % 4;
    format!("week{}", if n == 0 { 4 } else { n })
}

/// Lowercase English day name, as used in the schedule file.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

/// Parse a day name, ignoring case.
pub fn parse_day(s: &str) -> Option<Weekday> {
    let day = match s.to_lowercase().as_str() {
        "monday" => Weekday::Monday,
        "tuesday" => Weekday::Tuesday,
        "wednesday" => Weekday::Wednesday,
        "thursday" => Weekday::Thursday,
        "friday" => Weekday::Friday,
        "saturday" => Weekday::Saturday,
        "sunday" => Weekday::Sunday,
        _ => return None,
    };
    Some(day)
}

/// `monday` → `Monday`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn week_rotates_through_four_keys() {
        // 2025-01-06 is ISO week 2, and each following Monday advances one week.
        assert_eq!(week_key(date(2025, 1, 6)), "week2");
        assert_eq!(week_key(date(2025, 1, 13)), "week3");
        assert_eq!(week_key(date(2025, 1, 20)), "week4");
        assert_eq!(week_key(date(2025, 1, 27)), "week1");
    }

    #[test]
    fn iso_week_one_spans_the_year_boundary() {
        // 2024-12-30 belongs to ISO week 1 of 2025.
        assert_eq!(week_key(date(2024, 12, 30)), "week1");
    }

    #[test]
    fn day_names_round_trip() {
        for day in [
            Weekday::Monday,
            Weekday::Wednesday,
            Weekday::Sunday,
        ] {
            assert_eq!(parse_day(day_name(day)), Some(day));
        }
        assert_eq!(parse_day("FRIDAY"), Some(Weekday::Friday));
        assert_eq!(parse_day("EC-001"), None);
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("wednesday"), "Wednesday");
        assert_eq!(capitalize(""), "");
    }
}
