//! French number spelling.
//!
//! Compound numbers are written with spaces ("dix sept", "quatre vingt
//! onze") so that stripping punctuation before G2P never glues words.

use chrono::{Datelike, NaiveDate};

use super::Speller;

const ONES: [&str; 20] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix",
    "onze", "douze", "treize", "quatorze", "quinze", "seize", "dix sept", "dix huit",
    "dix neuf",
];

const TENS: [&str; 7] = ["", "", "vingt", "trente", "quarante", "cinquante", "soixante"];

const WEEKDAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

const MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

pub(crate) struct French;

fn below_hundred(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=69 => {
            let (tens, unit) = (TENS[(n / 10) as usize], n % 10);
            match unit {
                0 => tens.to_string(),
                1 => format!("{tens} et un"),
                u => format!("{tens} {}", ONES[u as usize]),
            }
        }
        71 => "soixante et onze".to_string(),
        70..=79 => format!("soixante {}", ONES[(n - 60) as usize]),
        80 => "quatre vingts".to_string(),
        _ => format!("quatre vingt {}", ONES[(n - 80) as usize]),
    }
}

fn below_thousand(n: u64) -> String {
    match (n / 100, n % 100) {
        (0, r) => below_hundred(r),
        (1, 0) => "cent".to_string(),
        (1, r) => format!("cent {}", below_hundred(r)),
        (h, 0) => format!("{} cents", ONES[h as usize]),
        (h, r) => format!("{} cent {}", ONES[h as usize], below_hundred(r)),
    }
}

/// "vingts" and "cents" lose their plural before "mille".
fn before_mille(words: String) -> String {
    match words.strip_suffix('s') {
        Some(head) if head.ends_with("vingt") || head.ends_with("cent") => head.to_string(),
        _ => words,
    }
}

/// Ordinal stem used for fractions and nothing else ("cinquième").
fn ordinal(n: u64) -> String {
    let cardinal = before_mille(French.cardinal(n));
    if let Some(head) = cardinal.strip_suffix("cinq") {
        format!("{head}cinquième")
    } else if let Some(head) = cardinal.strip_suffix("neuf") {
        format!("{head}neuvième")
    } else if let Some(head) = cardinal.strip_suffix('e') {
        format!("{head}ième")
    } else {
        format!("{cardinal}ième")
    }
}

impl Speller for French {
    fn cardinal(&self, n: u64) -> String {
        let scales: [(u64, &str, &str); 3] = [
            (1_000_000_000_000, "billion", "billions"),
            (1_000_000_000, "milliard", "milliards"),
            (1_000_000, "million", "millions"),
        ];
        let mut rest = n;
        let mut parts = Vec::new();
        for (unit, singular, plural) in scales {
            let count = rest / unit;
            rest %= unit;
            match count {
                0 => {}
                1 => parts.push(format!("un {singular}")),
                c => parts.push(format!("{} {plural}", below_thousand(c))),
            }
        }
        let (thousands, units) = (rest / 1000, rest % 1000);
        match thousands {
            0 => {}
            1 => parts.push("mille".to_string()),
            t => parts.push(format!("{} mille", before_mille(below_thousand(t)))),
        }
        if units > 0 || parts.is_empty() {
            parts.push(below_thousand(units));
        }
        parts.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "moins"
    }

    fn decimal_word(&self) -> &'static str {
        "virgule"
    }

    fn fraction(&self, numerator: u64, denominator: u64) -> String {
        let num = self.cardinal(numerator);
        let plural = numerator > 1;
        match denominator {
            1 => format!("{num} sur un"),
            2 if plural => format!("{num} demis"),
            2 => format!("{num} demi"),
            3 => format!("{num} tiers"),
            4 if plural => format!("{num} quarts"),
            4 => format!("{num} quart"),
            d if plural => format!("{num} {}s", ordinal(d)),
            d => format!("{num} {}", ordinal(d)),
        }
    }

    fn time(&self, hour: u32, minute: u32) -> String {
        let hours = match hour {
            1 => "une heure".to_string(),
            21 => "vingt et une heures".to_string(),
            h => format!("{} heures", self.cardinal(u64::from(h))),
        };
        match minute {
            0 => hours,
            m => format!("{hours} {}", self.cardinal(u64::from(m))),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        let day = match date.day() {
            1 => "premier".to_string(),
            d => self.cardinal(u64::from(d)),
        };
        format!(
            "{} {} {} {}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            day,
            MONTHS[date.month0() as usize],
            self.cardinal(date.year().unsigned_abs() as u64)
        )
    }
}
