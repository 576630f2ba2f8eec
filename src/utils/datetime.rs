/// Pure date handling for birthdays (Discord-agnostic)
use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// A registered birthday: day and month, with an optional two-digit birth year.
/// The year is informational only and never participates in date matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birthday {
    pub day: u32,
    pub month: u32,
    pub year: Option<u32>,
}

/// The input was not a valid `DD/MM` or `DD/MM/YY` date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateFormat(pub String);

impl std::fmt::Display for InvalidDateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date '{}': expected DD/MM or DD/MM/YY",
            self.0
        )
    }
}

impl std::error::Error for InvalidDateFormat {}

impl Birthday {
    /// Parse a birthday string, trying `DD/MM/YY` first and falling back to
    /// `DD/MM`. Day and month are validated against a real calendar, so
    /// `31/02` fails while `29/02` (yearless) is accepted.
    pub fn parse(input: &str) -> Result<Self, InvalidDateFormat> {
        parse_with_year(input)
            .or_else(|| parse_without_year(input))
            .ok_or_else(|| InvalidDateFormat(input.to_string()))
    }

    /// True iff this birthday falls on the given reference date (month and
    /// day equality; the birth year is ignored)
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.month == date.month() && self.day == date.day()
    }

    /// Canonical zero-padded form, preserving the shape used at input
    pub fn canonical(&self) -> String {
        match self.year {
            Some(year) => format!("{:02}/{:02}/{:02}", self.day, self.month, year),
            None => format!("{:02}/{:02}", self.day, self.month),
        }
    }
}

/// Two-digit years use the strptime `%y` pivot: 69-99 → 19xx, 00-68 → 20xx
fn expand_two_digit_year(year: u32) -> i32 {
    if year >= 69 {
        1900 + year as i32
    } else {
        2000 + year as i32
    }
}

fn parse_field(part: &str, max_digits: usize) -> Option<u32> {
    if part.is_empty() || part.len() > max_digits || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_with_year(input: &str) -> Option<Birthday> {
    let mut parts = input.trim().split('/');
    let day = parse_field(parts.next()?, 2)?;
    let month = parse_field(parts.next()?, 2)?;
    let year_part = parts.next()?;
    if parts.next().is_some() || year_part.len() != 2 {
        return None;
    }
    let year = parse_field(year_part, 2)?;

    // Validate against the actual (pivoted) year, so 29/02/99 fails
    NaiveDate::from_ymd_opt(expand_two_digit_year(year), month, day)?;
    Some(Birthday {
        day,
        month,
        year: Some(year),
    })
}

fn parse_without_year(input: &str) -> Option<Birthday> {
    let mut parts = input.trim().split('/');
    let day = parse_field(parts.next()?, 2)?;
    let month = parse_field(parts.next()?, 2)?;
    if parts.next().is_some() {
        return None;
    }

    // Validate against a leap reference year so 29/02 stays register-able
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some(Birthday {
        day,
        month,
        year: None,
    })
}

/// Today's date in the bot's reference timezone
pub fn current_date_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Member ids from a store snapshot whose birthday falls on `date`, sorted
/// for deterministic iteration. Unparseable entries are skipped.
pub fn members_with_birthday_on(entries: &HashMap<String, String>, date: NaiveDate) -> Vec<String> {
    let mut matched: Vec<String> = entries
        .iter()
        .filter(|(_, raw)| {
            Birthday::parse(raw)
                .map(|birthday| birthday.matches(date))
                .unwrap_or(false)
        })
        .map(|(member_id, _)| member_id.clone())
        .collect();
    matched.sort();
    matched
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_year() {
        assert_eq!(
            Birthday::parse("15/03"),
            Ok(Birthday {
                day: 15,
                month: 3,
                year: None
            })
        );
        assert_eq!(
            Birthday::parse("1/1"),
            Ok(Birthday {
                day: 1,
                month: 1,
                year: None
            })
        );
        assert_eq!(
            Birthday::parse("31/12"),
            Ok(Birthday {
                day: 31,
                month: 12,
                year: None
            })
        );
    }

    #[test]
    fn test_parse_with_year() {
        assert_eq!(
            Birthday::parse("15/03/90"),
            Ok(Birthday {
                day: 15,
                month: 3,
                year: Some(90)
            })
        );
        assert_eq!(
            Birthday::parse("16/03/99"),
            Ok(Birthday {
                day: 16,
                month: 3,
                year: Some(99)
            })
        );
        assert_eq!(
            Birthday::parse("01/01/00"),
            Ok(Birthday {
                day: 1,
                month: 1,
                year: Some(0)
            })
        );
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(Birthday::parse("31/02").is_err());
        assert!(Birthday::parse("00/01").is_err());
        assert!(Birthday::parse("15/13").is_err());
        assert!(Birthday::parse("32/01").is_err());
        assert!(Birthday::parse("31/04").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(Birthday::parse("").is_err());
        assert!(Birthday::parse("15").is_err());
        assert!(Birthday::parse("15/03/1990").is_err()); // year must be 2 digits
        assert!(Birthday::parse("15/03/9").is_err());
        assert!(Birthday::parse("15/03/90/1").is_err());
        assert!(Birthday::parse("aa/bb").is_err());
        assert!(Birthday::parse("+5/03").is_err());
        assert!(Birthday::parse("15-03").is_err());
    }

    #[test]
    fn test_leap_day_handling() {
        // Yearless Feb 29 must be register-able
        assert!(Birthday::parse("29/02").is_ok());
        // With an explicit non-leap year it does not exist
        assert!(Birthday::parse("29/02/99").is_err());
        assert!(Birthday::parse("29/02/00").is_ok()); // 2000 is a leap year
    }

    #[test]
    fn test_canonical_round_trips_padded_input() {
        for input in ["15/03", "15/03/90", "01/01", "29/02", "31/12/00"] {
            assert_eq!(Birthday::parse(input).unwrap().canonical(), input);
        }
    }

    #[test]
    fn test_canonical_pads_short_input() {
        assert_eq!(Birthday::parse("5/3").unwrap().canonical(), "05/03");
        assert_eq!(Birthday::parse("5/3/07").unwrap().canonical(), "05/03/07");
    }

    #[test]
    fn test_matches_ignores_year() {
        let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert!(Birthday::parse("15/03").unwrap().matches(reference));
        assert!(Birthday::parse("15/03/90").unwrap().matches(reference));

        let next_day = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert!(!Birthday::parse("15/03").unwrap().matches(next_day));
        assert!(!Birthday::parse("15/04").unwrap().matches(reference));
    }

    #[test]
    fn test_expand_two_digit_year_pivot() {
        assert_eq!(expand_two_digit_year(69), 1969);
        assert_eq!(expand_two_digit_year(99), 1999);
        assert_eq!(expand_two_digit_year(0), 2000);
        assert_eq!(expand_two_digit_year(68), 2068);
    }

    #[test]
    fn test_members_with_birthday_on() {
        let entries: HashMap<String, String> = [
            ("1".to_string(), "15/03".to_string()),
            ("2".to_string(), "16/03/99".to_string()),
        ]
        .into_iter()
        .collect();

        let march_15 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(members_with_birthday_on(&entries, march_15), vec!["1"]);

        let march_16 = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(members_with_birthday_on(&entries, march_16), vec!["2"]);

        let march_17 = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert!(members_with_birthday_on(&entries, march_17).is_empty());
    }

    #[test]
    fn test_members_with_birthday_on_skips_bad_entries() {
        let entries: HashMap<String, String> = [
            ("1".to_string(), "15/03".to_string()),
            ("2".to_string(), "not a date".to_string()),
        ]
        .into_iter()
        .collect();

        let march_15 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(members_with_birthday_on(&entries, march_15), vec!["1"]);
    }

    #[test]
    fn test_members_with_birthday_on_is_sorted() {
        let entries: HashMap<String, String> = [
            ("30".to_string(), "15/03".to_string()),
            ("10".to_string(), "15/03".to_string()),
            ("20".to_string(), "15/03/85".to_string()),
        ]
        .into_iter()
        .collect();

        let march_15 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            members_with_birthday_on(&entries, march_15),
            vec!["10", "20", "30"]
        );
    }

    #[test]
    fn test_get_month_name() {
        assert_eq!(get_month_name(1), "January");
        assert_eq!(get_month_name(6), "June");
        assert_eq!(get_month_name(12), "December");
        assert_eq!(get_month_name(0), "Unknown");
        assert_eq!(get_month_name(13), "Unknown");
    }

    #[test]
    fn test_current_date_in_reference_timezone() {
        // At any instant the UTC reference date differs from a fixed-offset
        // zone's date by at most one day; just verify it is a sane date.
        let today = current_date_in(chrono_tz::UTC);
        assert!(today.year() >= 2024);
    }
}
