//! Numeric date and 24-hour time parsing.
//!
//! A numeric date such as `08/03/2025` is resolved in three steps, each a
//! separate function:
//!
//! 1. [`DateParts::find`]: locate `(\d{1,4})[/-](\d{1,2})[/-](\d{1,4})`.
//! 2. [`split_year`]: a 4-digit outer part is the year; otherwise the last
//!    part is a year, two-digit years pivoting at 30 (`29` → 2029,
//!    `30` → 1930).
//! 3. [`order_day_month`]: a two-digit part above 12 is the day; otherwise
//!    the locale [`DateFormat`] decides.
//!
//! [`DateParts::resolve`] chains them and validates the calendar date.

use std::ops::Range;

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lang::DateFormat;

static RE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,4})[/-](\d{1,2})[/-](\d{1,4})").unwrap());

/// Two-digit years below this are in the 2000s, the rest in the 1900s.
pub const YEAR_PIVOT: u32 = 30;

/// One numeric component of a date as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePart {
    pub value: u32,
    pub digits: usize,
}

impl DatePart {
    fn parse(s: &str) -> Option<Self> {
        Some(Self {
            value: s.parse().ok()?,
            digits: s.len(),
        })
    }
}

/// The three components of a numeric date and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub matched: String,
    pub span: Range<usize>,
    pub parts: [DatePart; 3],
}

/// A year/month/day triple before calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ResolvedDate {
    /// The calendar date, or `None` for impossible values such as `31/02`.
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl DateParts {
    /// First numeric date in `text`.
    pub fn find(text: &str) -> Option<Self> {
        let caps = RE_DATE.captures(text)?;
        let whole = caps.get(0)?;
        let part = |i: usize| caps.get(i).and_then(|m| DatePart::parse(m.as_str()));
        Some(Self {
            matched: whole.as_str().to_string(),
            span: whole.range(),
            parts: [part(1)?, part(2)?, part(3)?],
        })
    }

    /// Year, month and day according to the disambiguation rules.
    pub fn resolve(&self, format: DateFormat) -> ResolvedDate {
        let (year, rest) = split_year(self.parts);
        let (day, month) = order_day_month(rest, format);
        ResolvedDate { year, month, day }
    }
}

/// Expand a year below 100 around [`YEAR_PIVOT`].
pub fn expand_year(year: u32) -> i32 {
    let year = year as i32;
    match year {
        y if y < YEAR_PIVOT as i32 => 2000 + y,
        y if y < 100 => 1900 + y,
        y => y,
    }
}

/// Pick the year out of the three parts; returns it with the other two in
/// their written order.
pub fn split_year(parts: [DatePart; 3]) -> (i32, [DatePart; 2]) {
    let [p1, p2, p3] = parts;
    if p1.digits == 4 {
        (p1.value as i32, [p2, p3])
    } else if p3.digits == 4 {
        (p3.value as i32, [p1, p2])
    } else {
        (expand_year(p3.value), [p1, p2])
    }
}

/// Order the two non-year parts as `(day, month)`.
pub fn order_day_month(rest: [DatePart; 2], format: DateFormat) -> (u32, u32) {
    let [a, b] = rest;
    let is_day = |p: DatePart| p.digits == 2 && p.value > 12;
    if is_day(a) {
        return (a.value, b.value);
    }
    if is_day(b) {
        return (b.value, a.value);
    }
    match format {
        DateFormat::Mdy => (b.value, a.value),
        DateFormat::Dmy => (a.value, b.value),
    }
}

/// Validate a 24-hour clock time given as hour and minute digits.
pub fn parse_time(hour: &str, minute: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn part(s: &str) -> DatePart {
        DatePart::parse(s).unwrap()
    }

    #[test]
    fn test_find() {
        let d = DateParts::find("The date is 08/03/2025.").unwrap();
        assert_eq!(d.matched, "08/03/2025");
        assert_eq!(d.span, 12..22);
        assert_eq!(d.parts[2], DatePart { value: 2025, digits: 4 });
        assert!(DateParts::find("no date 12/5 here").is_none());
    }

    #[test]
    fn test_expand_year() {
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(29), 2029);
        assert_eq!(expand_year(30), 1930);
        assert_eq!(expand_year(99), 1999);
        assert_eq!(expand_year(123), 123);
    }

    #[test]
    fn test_split_year() {
        let (y, rest) = split_year([part("2025"), part("03"), part("08")]);
        assert_eq!(y, 2025);
        assert_eq!(rest, [part("03"), part("08")]);

        let (y, rest) = split_year([part("08"), part("03"), part("2025")]);
        assert_eq!(y, 2025);
        assert_eq!(rest, [part("08"), part("03")]);

        let (y, _) = split_year([part("08"), part("03"), part("25")]);
        assert_eq!(y, 2025);
        let (y, _) = split_year([part("08"), part("03"), part("95")]);
        assert_eq!(y, 1995);
    }

    #[test]
    fn test_order_day_month() {
        // An unambiguous day wins over the locale format.
        assert_eq!(order_day_month([part("15"), part("05")], DateFormat::Mdy), (15, 5));
        assert_eq!(order_day_month([part("05"), part("15")], DateFormat::Dmy), (15, 5));
        // Ambiguous: the locale decides.
        assert_eq!(order_day_month([part("08"), part("03")], DateFormat::Mdy), (3, 8));
        assert_eq!(order_day_month([part("08"), part("03")], DateFormat::Dmy), (8, 3));
    }

    #[test]
    fn test_resolve_mdy_vs_dmy() {
        let d = DateParts::find("08/03/2025").unwrap();
        let us = d.resolve(DateFormat::Mdy).to_date().unwrap();
        let pt = d.resolve(DateFormat::Dmy).to_date().unwrap();
        assert_eq!(us, NaiveDate::from_ymd_opt(2025, 8, 3).unwrap());
        assert_eq!(pt, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
    }

    #[test]
    fn test_resolve_year_first() {
        let d = DateParts::find("2024-10-25").unwrap();
        let date = d.resolve(DateFormat::Dmy).to_date().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 10, 25).unwrap());
    }

    #[test]
    fn test_invalid_calendar_date() {
        let d = DateParts::find("31/02/2025").unwrap();
        let resolved = d.resolve(DateFormat::Dmy);
        assert_eq!(resolved, ResolvedDate { year: 2025, month: 2, day: 31 });
        assert!(resolved.to_date().is_none());
    }

    #[test]
    fn test_parse_time() {
        let t = parse_time("19", "30").unwrap();
        assert_eq!((t.hour(), t.minute()), (19, 30));
        assert!(parse_time("24", "00").is_none());
        assert!(parse_time("12", "60").is_none());
    }
}
