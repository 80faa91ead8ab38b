//! Spanish number spelling (long scale: `mil millones`, `billón` = 10¹²).

use chrono::{Datelike, NaiveDate};

use super::Speller;

const ONES: [&str; 30] = [
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve", "diez",
    "once", "doce", "trece", "catorce", "quince", "dieciséis", "diecisiete", "dieciocho",
    "diecinueve", "veinte", "veintiuno", "veintidós", "veintitrés", "veinticuatro",
    "veinticinco", "veintiséis", "veintisiete", "veintiocho", "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "", "ciento", "doscientos", "trescientos", "cuatrocientos", "quinientos", "seiscientos",
    "setecientos", "ochocientos", "novecientos",
];

const WEEKDAYS: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];

const MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

pub(crate) struct Spanish;

fn below_hundred(n: u64) -> String {
    if n < 30 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} y {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u64) -> String {
    match (n / 100, n % 100) {
        (0, r) => below_hundred(r),
        (1, 0) => "cien".to_string(),
        (h, 0) => HUNDREDS[h as usize].to_string(),
        (h, r) => format!("{} {}", HUNDREDS[h as usize], below_hundred(r)),
    }
}

/// "uno" shortens before a noun or a scale word: "veintiún mil", "un millón".
fn apocope(words: String) -> String {
    if let Some(head) = words.strip_suffix("veintiuno") {
        format!("{head}veintiún")
    } else if let Some(head) = words.strip_suffix("uno") {
        format!("{head}un")
    } else {
        words
    }
}

fn below_million(n: u64) -> String {
    let (thousands, rest) = (n / 1000, n % 1000);
    let head = match thousands {
        0 => return below_thousand(rest),
        1 => "mil".to_string(),
        t => format!("{} mil", apocope(below_thousand(t))),
    };
    if rest == 0 {
        head
    } else {
        format!("{head} {}", below_thousand(rest))
    }
}

impl Speller for Spanish {
    fn cardinal(&self, n: u64) -> String {
        let (billions, rest) = (n / 1_000_000_000_000, n % 1_000_000_000_000);
        let (millions, rest) = (rest / 1_000_000, rest % 1_000_000);

        let mut parts = Vec::new();
        match billions {
            0 => {}
            1 => parts.push("un billón".to_string()),
            b => parts.push(format!("{} billones", apocope(below_million(b)))),
        }
        match millions {
            0 => {}
            1 => parts.push("un millón".to_string()),
            m => parts.push(format!("{} millones", apocope(below_million(m)))),
        }
        if rest > 0 || parts.is_empty() {
            parts.push(below_million(rest));
        }
        parts.join(" ")
    }

    fn minus_word(&self) -> &'static str {
        "menos"
    }

    fn decimal_word(&self) -> &'static str {
        "coma"
    }

    fn fraction(&self, numerator: u64, denominator: u64) -> String {
        let num = apocope(self.cardinal(numerator));
        let stem = match denominator {
            1 => return format!("{} entre uno", self.cardinal(numerator)),
            2 => "medio".to_string(),
            3 => "tercio".to_string(),
            4 => "cuarto".to_string(),
            5 => "quinto".to_string(),
            6 => "sexto".to_string(),
            7 => "séptimo".to_string(),
            8 => "octavo".to_string(),
            9 => "noveno".to_string(),
            10 => "décimo".to_string(),
            100 => "centésimo".to_string(),
            1000 => "milésimo".to_string(),
            d => format!("{}avo", self.cardinal(d)),
        };
        if numerator == 1 {
            format!("{num} {stem}")
        } else {
            format!("{num} {stem}s")
        }
    }

    fn time(&self, hour: u32, minute: u32) -> String {
        let hours = match hour {
            1 => "una".to_string(),
            21 => "veintiuna".to_string(),
            h => self.cardinal(u64::from(h)),
        };
        match minute {
            0 => format!("{hours} en punto"),
            m => format!("{hours} y {}", self.cardinal(u64::from(m))),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} de {} de {}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            self.cardinal(u64::from(date.day())),
            MONTHS[date.month0() as usize],
            self.cardinal(date.year().unsigned_abs() as u64)
        )
    }
}
