//! Portuguese number spelling, European and Brazilian.
//!
//! The two variants differ in the teens (`dezasseis` / `dezesseis`) and in
//! the scale words above a million: European Portuguese uses the long scale
//! (`mil milhões`, `bilião` = 10¹²), Brazilian the short one (`bilhão` = 10⁹).

use chrono::{Datelike, NaiveDate};

use super::Speller;

const ONES_PT: [&str; 20] = [
    "zero", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    "onze", "doze", "treze", "catorze", "quinze", "dezasseis", "dezassete", "dezoito",
    "dezanove",
];

const ONES_BR: [&str; 20] = [
    "zero", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove", "dez",
    "onze", "doze", "treze", "catorze", "quinze", "dezesseis", "dezessete", "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "", "cento", "duzentos", "trezentos", "quatrocentos", "quinhentos", "seiscentos",
    "setecentos", "oitocentos", "novecentos",
];

const WEEKDAYS: [&str; 7] = [
    "segunda feira", "terça feira", "quarta feira", "quinta feira", "sexta feira", "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

pub(crate) struct Portuguese {
    pub(crate) brazilian: bool,
}

/// `e` joins a trailing group below a hundred or a round hundred:
/// "mil e cinco", "mil e duzentos", but "mil duzentos e trinta".
fn join_rest(head: String, rest: u64, rest_words: String) -> String {
    if rest < 100 || rest % 100 == 0 {
        format!("{head} e {rest_words}")
    } else {
        format!("{head} {rest_words}")
    }
}

/// Feminine form for counting hours: "uma", "duas".
fn feminine(words: &str) -> String {
    let (head, last) = match words.rsplit_once(' ') {
        Some((head, last)) => (format!("{head} "), last),
        None => (String::new(), words),
    };
    let last = match last {
        "um" => "uma",
        "dois" => "duas",
        other => other,
    };
    format!("{head}{last}")
}

impl Portuguese {
    fn ones(&self) -> &'static [&'static str; 20] {
        if self.brazilian {
            &ONES_BR
        } else {
            &ONES_PT
        }
    }

    fn below_hundred(&self, n: u64) -> String {
        if n < 20 {
            self.ones()[n as usize].to_string()
        } else if n % 10 == 0 {
            TENS[(n / 10) as usize].to_string()
        } else {
            format!("{} e {}", TENS[(n / 10) as usize], self.ones()[(n % 10) as usize])
        }
    }

    fn below_thousand(&self, n: u64) -> String {
        match (n / 100, n % 100) {
            (0, r) => self.below_hundred(r),
            (1, 0) => "cem".to_string(),
            (h, 0) => HUNDREDS[h as usize].to_string(),
            (h, r) => format!("{} e {}", HUNDREDS[h as usize], self.below_hundred(r)),
        }
    }

    fn below_million(&self, n: u64) -> String {
        let (thousands, rest) = (n / 1000, n % 1000);
        let head = match thousands {
            0 => return self.below_thousand(rest),
            1 => "mil".to_string(),
            t => format!("{} mil", self.below_thousand(t)),
        };
        if rest == 0 {
            head
        } else {
            join_rest(head, rest, self.below_thousand(rest))
        }
    }

    /// `count` units of a scale word with singular and plural forms.
    fn scaled(&self, count: u64, singular: &str, plural: &str) -> String {
        if count == 1 {
            format!("um {singular}")
        } else {
            format!("{} {plural}", self.below_million(count))
        }
    }

    fn large(&self, n: u64) -> String {
        // (value of one unit, singular, plural), largest first.
        let scales: &[(u64, &str, &str)] = if self.brazilian {
            &[
                (1_000_000_000_000, "trilhão", "trilhões"),
                (1_000_000_000, "bilhão", "bilhões"),
                (1_000_000, "milhão", "milhões"),
            ]
        } else {
            &[(1_000_000_000_000, "bilião", "biliões"), (1_000_000, "milhão", "milhões")]
        };

        let mut rest = n;
        let mut parts = Vec::new();
        for &(unit, singular, plural) in scales {
            let count = rest / unit;
            rest %= unit;
            if count > 0 {
                parts.push(self.scaled(count, singular, plural));
            }
        }
        let head = parts.join(" ");
        match rest {
            0 => head,
            r if head.is_empty() => self.below_million(r),
            r => join_rest(head, r, self.below_million(r)),
        }
    }
}

impl Speller for Portuguese {
    fn cardinal(&self, n: u64) -> String {
        if n < 1_000_000 {
            self.below_million(n)
        } else {
            self.large(n)
        }
    }

    fn minus_word(&self) -> &'static str {
        "menos"
    }

    fn decimal_word(&self) -> &'static str {
        "vírgula"
    }

    fn fraction(&self, numerator: u64, denominator: u64) -> String {
        let num = self.cardinal(numerator);
        let stem = match denominator {
            1 => return format!("{num} sobre um"),
            2 => "meio".to_string(),
            3 => "terço".to_string(),
            4 => "quarto".to_string(),
            5 => "quinto".to_string(),
            6 => "sexto".to_string(),
            7 => "sétimo".to_string(),
            8 => "oitavo".to_string(),
            9 => "nono".to_string(),
            10 => "décimo".to_string(),
            100 => "centésimo".to_string(),
            1000 => "milésimo".to_string(),
            d => format!("{} avo", self.cardinal(d)),
        };
        if numerator == 1 {
            format!("{num} {stem}")
        } else {
            format!("{num} {stem}s")
        }
    }

    fn time(&self, hour: u32, minute: u32) -> String {
        let hours = feminine(&self.cardinal(u64::from(hour)));
        match (hour, minute) {
            (1, 0) => format!("{hours} hora"),
            (_, 0) => format!("{hours} horas"),
            (_, m) => format!("{hours} e {}", self.cardinal(u64::from(m))),
        }
    }

    fn date(&self, date: NaiveDate) -> String {
        let year = date.year().unsigned_abs() as u64;
        format!(
            "{}, {} de {} de {}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            self.cardinal(u64::from(date.day())),
            MONTHS[date.month0() as usize],
            self.cardinal(year)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PT: Portuguese = Portuguese { brazilian: false };
    const BR: Portuguese = Portuguese { brazilian: true };

    #[test]
    fn test_cardinal_pt() {
        let cases = [
            (0, "zero"),
            (16, "dezasseis"),
            (21, "vinte e um"),
            (100, "cem"),
            (101, "cento e um"),
            (200, "duzentos"),
            (1000, "mil"),
            (1005, "mil e cinco"),
            (1200, "mil e duzentos"),
            (1230, "mil duzentos e trinta"),
            (2025, "dois mil e vinte e cinco"),
            (123_456, "cento e vinte e três mil quatrocentos e cinquenta e seis"),
            (1_000_000, "um milhão"),
            (2_500_000, "dois milhões e quinhentos mil"),
            (1_000_000_000, "mil milhões"),
            (1_000_000_000_000, "um bilião"),
        ];
        for (n, expected) in cases {
            assert_eq!(PT.cardinal(n), expected, "n = {n}");
        }
    }

    #[test]
    fn test_cardinal_br() {
        assert_eq!(BR.cardinal(16), "dezesseis");
        assert_eq!(BR.cardinal(19), "dezenove");
        assert_eq!(BR.cardinal(1_000_000_000), "um bilhão");
        assert_eq!(BR.cardinal(3_000_000_000), "três bilhões");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(PT.fraction(1, 2), "um meio");
        assert_eq!(PT.fraction(3, 4), "três quartos");
        assert_eq!(PT.fraction(2, 11), "dois onze avos");
    }

    #[test]
    fn test_time() {
        assert_eq!(PT.time(14, 30), "catorze e trinta");
        assert_eq!(PT.time(1, 0), "uma hora");
        assert_eq!(PT.time(22, 0), "vinte e duas horas");
    }

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        assert_eq!(PT.date(d), "domingo, três de agosto de dois mil e vinte e cinco");
    }
}
