//! Publish-date extraction from rendered text.
//!
//! [`extract_raw_date`] finds the most complete date-like substring of a
//! text and returns it verbatim. [`parse_raw_date`] is a separate,
//! best-effort step turning that string into a calendar value; it may fail
//! while the raw string is still useful as a structural signal.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};

use crate::patterns::{DATE_CJK_FULL, DATE_CJK_MONTH_DAY, DATE_DMY, DATE_YMD};

/// Order of the numeric date fields a matcher captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldOrder {
    /// `y`, `m`, `d` groups.
    YearMonthDay,
    /// `a`, `b`, `y` groups; day-first when `a` cannot be a month.
    AmbiguousDayMonth,
    /// `m`, `d` groups, no year.
    MonthDay,
}

struct DateMatcher {
    regex: &'static LazyLock<Regex>,
    order: FieldOrder,
}

/// Matchers in priority order.
static MATCHERS: [DateMatcher; 4] = [
    DateMatcher { regex: &DATE_CJK_FULL, order: FieldOrder::YearMonthDay },
    DateMatcher { regex: &DATE_YMD, order: FieldOrder::YearMonthDay },
    DateMatcher { regex: &DATE_DMY, order: FieldOrder::AmbiguousDayMonth },
    DateMatcher { regex: &DATE_CJK_MONTH_DAY, order: FieldOrder::MonthDay },
];

/// Numeric fields read from one match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DateFields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl DateFields {
    fn from_captures(caps: &Captures, order: FieldOrder) -> Self {
        let num = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

        let (year, month, day) = match order {
            FieldOrder::YearMonthDay => (num("y"), num("m"), num("d")),
            FieldOrder::AmbiguousDayMonth => {
                let (a, b) = (num("a"), num("b"));
                // 31/12/2024 is day-first; 12/31/2024 and 05/06/2024 read month-first.
                if a.is_some_and(|a| a > 12) {
                    (num("y"), b, a)
                } else {
                    (num("y"), a, b)
                }
            }
            FieldOrder::MonthDay => (None, num("m"), num("d")),
        };

        Self {
            year: year.and_then(|y| i32::try_from(y).ok()),
            month,
            day,
            hour: num("hh"),
            minute: num("mi"),
            second: num("ss"),
        }
    }

    /// Number of separator-delimited components present.
    fn components(&self) -> usize {
        [
            self.year.is_some(),
            self.month.is_some(),
            self.day.is_some(),
            self.hour.is_some(),
            self.minute.is_some(),
            self.second.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    fn to_datetime(self, default_year: i32) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(self.year.unwrap_or(default_year), self.month?, self.day?)?;
        date.and_hms_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )
    }
}

/// Best match in `text` as (raw string, fields).
fn best_match(text: &str) -> Option<(String, DateFields)> {
    let mut best: Option<(String, DateFields)> = None;

    for matcher in &MATCHERS {
        for caps in matcher.regex.captures_iter(text) {
            let Some(raw) = caps.name("raw") else {
                continue;
            };
            // `2024-01-055` is not a date; `1月5日2` still is.
            let is_digit = |c: char| c.is_ascii_digit();
            if raw.as_str().ends_with(is_digit) && text[raw.end()..].starts_with(is_digit) {
                continue;
            }
            let fields = DateFields::from_captures(&caps, matcher.order);
            if fields.month.is_none_or(|m| !(1..=12).contains(&m))
                || fields.day.is_none_or(|d| !(1..=31).contains(&d))
            {
                continue;
            }
            // Earlier matchers win ties.
            if best.as_ref().is_none_or(|(_, b)| fields.components() > b.components()) {
                best = Some((raw.as_str().trim().to_string(), fields));
            }
        }
    }

    best
}

/// Extract the most complete date-like substring of `text`.
///
/// Numeric `y-m-d`, `y/m/d`, `m-d-y`, `d/m/y` forms and CJK
/// year/month/day forms are recognized, each optionally followed by a
/// time. When several candidates exist the one with the most components
/// wins.
///
/// # Example
///
/// ```rust
/// use catalog_detect::date::extract_raw_date;
///
/// let raw = extract_raw_date("Markets rally | 2024-03-08 09:15 | Reuters");
/// assert_eq!(raw.as_deref(), Some("2024-03-08 09:15"));
/// assert_eq!(extract_raw_date("No date here"), None);
/// ```
#[must_use]
pub fn extract_raw_date(text: &str) -> Option<String> {
    best_match(text).map(|(raw, _)| raw)
}

/// Parse a raw date string into a calendar value.
///
/// Forms without a year take the current year. Returns `None` when the
/// string holds no valid calendar date.
#[must_use]
pub fn parse_raw_date(raw: &str) -> Option<NaiveDateTime> {
    let (_, fields) = best_match(raw)?;
    fields.to_datetime(Utc::now().year())
}
