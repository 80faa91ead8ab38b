//! German number spelling.
//!
//! Numbers below a million are written as one compound word
//! ("zweitausendfünfundzwanzig"); Million, Milliarde and Billion stand apart.

use chrono::{Datelike, NaiveDate};

use super::Speller;

const ONES: [&str; 20] = [
    "null", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn",
    "elf", "zwölf", "dreizehn", "vierzehn", "fünfzehn", "sechzehn", "siebzehn", "achtzehn",
    "neunzehn",
];

const TENS: [&str; 10] = [
    "", "", "zwanzig", "dreißig", "vierzig", "fünfzig", "sechzig", "siebzig", "achtzig",
    "neunzig",
];

const WEEKDAYS: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];

const MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

pub(crate) struct German;

/// `final_one` selects "eins" over the prefix form "ein".
fn below_hundred(n: u64, final_one: bool) -> String {
    match n {
        1 if !final_one => "ein".to_string(),
        0..=19 => ONES[n as usize].to_string(),
        _ => {
            let (tens, unit) = (TENS[(n / 10) as usize], n % 10);
            match unit {
                0 => tens.to_string(),
                1 => format!("einund{tens}"),
                u => format!("{}und{tens}", ONES[u as usize]),
            }
        }
    }
}

fn below_thousand(n: u64, final_one: bool) -> String {
    let (hundreds, rest) = (n / 100, n % 100);
    let mut words = String::new();
    if hundreds > 0 {
        words.push_str(&below_hundred(hundreds, false));
        words.push_str("hundert");
    }
    if rest > 0 || hundreds == 0 {
        words.push_str(&below_hundred(rest, final_one));
    }
    words
}

fn below_million(n: u64) -> String {
    let (thousands, rest) = (n / 1000, n % 1000);
    if thousands == 0 {
        return below_thousand(rest, true);
    }
    let mut words = below_thousand(thousands, false);
    words.push_str("tausend");
    if rest > 0 {
        words.push_str(&below_thousand(rest, true));
    }
    words
}

fn ordinal(n: u64) -> String {
    match n {
        1 => "erste".to_string(),
        3 => "dritte".to_string(),
        7 => "siebte".to_string(),
        8 => "achte".to_string(),
        2..=19 => format!("{}te", German.cardinal(n)),
        _ => format!("{}ste", German.cardinal(n)),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Speller for German {
    fn cardinal(&self, n: u64) -> String {
        let scales: [(u64, &str, &str); 3] = [
            (1_000_000_000_000, "Billion", "Billionen"),
            (1_000_000_000, "Milliarde", "Milliarden"),
            (1_000_000, "Million", "Millionen"),
        ];
        let mut rest = n;
        let mut parts = Vec::new();
        for (unit, singular, plural) in scales {
            let count = rest / unit;
            rest %= unit;
            match count {
                0 => {}
                1 => parts.push(format!("eine {singular}")),
                c => parts.push(format!("{} {plural}", below_thousand(c, true))),
            }
        }
        if rest > 0 || parts.is_empty() {
            parts.push(below_million(rest));
        }
        parts.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "minus"
    }

    fn decimal_word(&self) -> &'static str {
        "Komma"
    }

    fn fraction(&self, numerator: u64, denominator: u64) -> String {
        let num = match numerator {
            1 => "ein".to_string(),
            n => self.cardinal(n),
        };
        let den = match denominator {
            1 => return format!("{} durch eins", self.cardinal(numerator)),
            2 if numerator == 1 => "halb".to_string(),
            2 => "Halbe".to_string(),
            3 => "Drittel".to_string(),
            7 => "Siebtel".to_string(),
            8 => "Achtel".to_string(),
            d @ 4..=19 => capitalize(&format!("{}tel", self.cardinal(d))),
            d => capitalize(&format!("{}stel", self.cardinal(d))),
        };
        format!("{num} {den}")
    }

    fn time(&self, hour: u32, minute: u32) -> String {
        let hours = match hour {
            1 => "ein".to_string(),
            h => self.cardinal(u64::from(h)),
        };
        match minute {
            0 => format!("{hours} Uhr"),
            m => format!("{hours} Uhr {}", self.cardinal(u64::from(m))),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        let year = date.year().unsigned_abs() as u64;
        let year_words = if (1100..2000).contains(&year) {
            format!(
                "{}hundert{}",
                below_hundred(year / 100, true),
                if year % 100 > 0 { below_hundred(year % 100, true) } else { String::new() }
            )
        } else {
            self.cardinal(year)
        };
        format!(
            "{}, der {} {} {}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            ordinal(u64::from(date.day())),
            MONTHS[date.month0() as usize],
            year_words
        )
    }
}
