//! English number spelling.

use chrono::{Datelike, NaiveDate};

use super::{thousands_groups, Speller};

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 5] = ["", "thousand", "million", "billion", "trillion"];

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

pub(crate) struct English;

fn below_hundred(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    let (hundreds, rest) = (n / 100, n % 100);
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} hundred", ONES[h as usize]),
        (h, r) => format!("{} hundred and {}", ONES[h as usize], below_hundred(r)),
    }
}

/// Ordinal form of a cardinal ("twenty one" → "twenty first").
pub(crate) fn ordinal(n: u64) -> String {
    let cardinal = English.cardinal(n);
    let (head, last) = match cardinal.rsplit_once(' ') {
        Some((head, last)) => (format!("{head} "), last),
        None => (String::new(), cardinal.as_str()),
    };
    let last = match last {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{w}th"),
    };
    format!("{head}{last}")
}

/// "nineteen eighty four", "two thousand and five", "nineteen hundred".
fn year(y: i32) -> String {
    let y = y.unsigned_abs() as u64;
    if !(1000..10_000).contains(&y) || (2000..2010).contains(&y) || y % 1000 < 10 {
        return English.cardinal(y);
    }
    let (hi, lo) = (y / 100, y % 100);
    match lo {
        0 => format!("{} hundred", below_hundred(hi)),
        1..=9 => format!("{} oh {}", below_hundred(hi), ONES[lo as usize]),
        _ => format!("{} {}", below_hundred(hi), below_hundred(lo)),
    }
}

impl Speller for English {
    fn cardinal(&self, n: u64) -> String {
        if n == 0 {
            return ONES[0].to_string();
        }
        let groups = thousands_groups(n);
        let mut parts = Vec::new();
        for (scale, &group) in groups.iter().enumerate().rev() {
            if group == 0 {
                continue;
            }
            let words = below_thousand(group);
            if scale == 0 && groups.len() > 1 && group < 100 {
                parts.push(format!("and {words}"));
            } else if scale == 0 {
                parts.push(words);
            } else {
                parts.push(format!("{words} {}", SCALES[scale]));
            }
        }
        parts.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "minus"
    }

    fn decimal_word(&self) -> &'static str {
        "point"
    }

    fn fraction(&self, numerator: u64, denominator: u64) -> String {
        let num = self.cardinal(numerator);
        let plural = numerator != 1;
        let den = match denominator {
            1 => return format!("{num} over one"),
            2 if plural => "halves".to_string(),
            2 => "half".to_string(),
            4 if plural => "quarters".to_string(),
            4 => "quarter".to_string(),
            d if plural => format!("{}s", ordinal(d)),
            d => ordinal(d),
        };
        format!("{num} {den}")
    }

    fn time(&self, hour: u32, minute: u32) -> String {
        let hour_words = if hour < 10 {
            format!("zero {}", ONES[hour as usize])
        } else {
            below_hundred(u64::from(hour))
        };
        match minute {
            0 => format!("{hour_words} hundred"),
            1..=9 => format!("{hour_words} oh {}", ONES[minute as usize]),
            m => format!("{hour_words} {}", below_hundred(u64::from(m))),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} {}, {}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            MONTHS[date.month0() as usize],
            ordinal(u64::from(date.day())),
            year(date.year())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal() {
        let cases = [
            (0, "zero"),
            (7, "seven"),
            (42, "forty two"),
            (100, "one hundred"),
            (105, "one hundred and five"),
            (1005, "one thousand and five"),
            (12345, "twelve thousand three hundred and forty five"),
            (1_000_000, "one million"),
            (2_000_003_000, "two billion three thousand"),
        ];
        for (n, expected) in cases {
            assert_eq!(English.cardinal(n), expected, "n = {n}");
        }
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(3), "third");
        assert_eq!(ordinal(12), "twelfth");
        assert_eq!(ordinal(20), "twentieth");
        assert_eq!(ordinal(21), "twenty first");
        assert_eq!(ordinal(30), "thirtieth");
        assert_eq!(ordinal(100), "one hundredth");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(English.fraction(3, 3), "three thirds");
        assert_eq!(English.fraction(1, 2), "one half");
        assert_eq!(English.fraction(3, 4), "three quarters");
        assert_eq!(English.fraction(5, 1), "five over one");
    }

    #[test]
    fn test_time() {
        assert_eq!(English.time(19, 30), "nineteen thirty");
        assert_eq!(English.time(14, 0), "fourteen hundred");
        assert_eq!(English.time(8, 5), "zero eight oh five");
    }

    #[test]
    fn test_year() {
        assert_eq!(year(1984), "nineteen eighty four");
        assert_eq!(year(1900), "nineteen hundred");
        assert_eq!(year(1905), "nineteen oh five");
        assert_eq!(year(2005), "two thousand and five");
        assert_eq!(year(2025), "twenty twenty five");
    }

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        assert_eq!(English.date(d), "sunday, august third, twenty twenty five");
    }
}
