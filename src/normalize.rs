//! Locale-aware text normalisation.
//!
//! Turns raw text into speakable words before phonemisation.  The passes
//! run in a fixed order, each on the output of the previous one:
//!
//! 1. dates and times (`19h30`, `10:05`, `08/03/2025`, English `10am`)
//! 2. `word-digit` splitting (`sub-23` → `sub 23`)
//! 3. numbers followed by a unit (`12345€`, `5ft`, `0,5%`)
//! 4. word by word: contractions, titles, fractions, plain numbers and the
//!    rule-based cardinal fallback
//!
//! Normalisation never fails.  Anything that cannot be spoken is left as
//! written and a diagnostic goes to `tracing`.

use chrono::Timelike;
use fancy_regex::{Captures, Regex};
use once_cell::sync::Lazy;

use crate::datetime::{self, DateParts};
use crate::lang::{DateFormat, LocaleTag, NumberSeparators};
use crate::lexicon;
use crate::numbers::{self, RbnfEngine, Speller};

// ─────────────────────────────────────────────────────────────────────────────
// Regex patterns (compiled once)
// ─────────────────────────────────────────────────────────────────────────────

static RE_AM_PM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d)\s?([ap])m\b").unwrap());
static RE_TIME_H: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d{1,2})h(\d{2})").unwrap());
static RE_TIME_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?<![\d:])(\d{1,2}):(\d{2})(?![\d:])").unwrap());
static RE_HYPHEN_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)-(\d+)").unwrap());
static RE_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+/\d+$").unwrap());

/// A number as written next to a unit, sign and separators included.
const UNIT_NUMBER: &str = r"(-?\d+(?:[.,]\d+)*)";

// ─────────────────────────────────────────────────────────────────────────────
// Number canonicalisation
// ─────────────────────────────────────────────────────────────────────────────

fn split_sign(token: &str) -> (&'static str, &str) {
    match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token),
    }
}

/// True when `s` splits on `sep` into a 1–3 digit head followed by groups of
/// exactly three digits (`1.234.567`).
fn is_grouped(s: &str, sep: char) -> bool {
    let mut groups = s.split(sep);
    let head_ok = groups
        .next()
        .is_some_and(|h| (1..=3).contains(&h.len()) && h.bytes().all(|b| b.is_ascii_digit()));
    let mut rest = groups.peekable();
    head_ok
        && rest.peek().is_some()
        && rest.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Rewrite a word written with locale separators into `-?\d+(\.\d+)?`.
///
/// * thousands before decimal (`123.456,78` in `pt`): strip the thousands
///   separators, the decimal separator becomes `.`
/// * otherwise a decimal separator that leaves a number once it reads `.`
///   (`1,5` in `pt`) becomes `.`
/// * otherwise thousands separators are stripped when that leaves a number,
///   whatever the group sizes (`12,34` in `en` is `1234`)
///
/// Returns `None` when the result is not a plain number.
pub fn canonical_number(token: &str, seps: NumberSeparators) -> Option<String> {
    let (sign, body) = split_sign(token);
    let thousands = body.find(seps.thousands);
    let decimal = body.find(seps.decimal);

    let as_decimal = body.replacen(seps.decimal, ".", 1);
    let stripped = body.replace(seps.thousands, "");
    let canonical = match (thousands, decimal) {
        (Some(t), Some(d)) if t < d => stripped.replace(seps.decimal, "."),
        (_, Some(_)) if numbers::is_plain_number(&as_decimal) => as_decimal,
        (Some(_), _) if numbers::is_plain_number(&stripped) => stripped,
        _ => body.to_string(),
    };

    let canonical = format!("{sign}{canonical}");
    numbers::is_plain_number(&canonical).then_some(canonical)
}

/// Like [`canonical_number`], for a number glued to a unit symbol.
///
/// Thousands separators only count as such before groups of exactly three
/// digits; `1,5€` in `en` is rejected instead of read as `15`.  A lone
/// period in a comma-decimal locale that does not group thousands
/// (`0.5%` in `pt`) is read as a decimal point.
pub fn canonical_unit_number(token: &str, seps: NumberSeparators) -> Option<String> {
    let (sign, body) = split_sign(token);
    let thousands = body.find(seps.thousands);
    let decimal = body.find(seps.decimal);

    let canonical = match (thousands, decimal) {
        (Some(t), Some(d)) if t < d => {
            let (int, frac) = body.split_at(d);
            if !is_grouped(int, seps.thousands) {
                return None;
            }
            format!("{}.{}", int.replace(seps.thousands, ""), &frac[seps.decimal.len_utf8()..])
        }
        (_, Some(_)) if seps.decimal != '.' => {
            let candidate = body.replacen(seps.decimal, ".", 1);
            if numbers::is_plain_number(&candidate) {
                candidate
            } else {
                body.to_string()
            }
        }
        (Some(_), None) if is_grouped(body, seps.thousands) => body.replace(seps.thousands, ""),
        _ => body.to_string(),
    };

    let canonical = format!("{sign}{canonical}");
    numbers::is_plain_number(&canonical).then_some(canonical)
}

// ─────────────────────────────────────────────────────────────────────────────
// Standalone passes
// ─────────────────────────────────────────────────────────────────────────────

/// `sub-23` → `sub 23`.
pub fn split_word_digit(text: &str) -> String {
    RE_HYPHEN_DIGIT.replace_all(text, "$1 $2").into_owned()
}

/// English `10am` / `7 PM` → `10 A M` / `7 P M`.
pub fn expand_am_pm(text: &str) -> String {
    RE_AM_PM
        .replace_all(text, |caps: &Captures| {
            format!("{} {} M", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

fn strip_trailing_punctuation(word: &str) -> (&str, &str) {
    let stripped = word.trim_end_matches(|c: char| c.is_ascii_punctuation());
    word.split_at(stripped.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Unit regexes for one language: symbols (`€`, `°C`) first, then
/// alphanumeric abbreviations (`km`) that must end on a word boundary.
struct UnitPatterns {
    symbolic: Option<Regex>,
    alphanumeric: Option<Regex>,
}

fn alternation(mut symbols: Vec<&str>) -> Option<String> {
    if symbols.is_empty() {
        return None;
    }
    // Longest first so that `°C` wins over `°` and `mm` over `m`.
    symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    let escaped: Vec<String> = symbols.iter().map(|s| regex::escape(s)).collect();
    Some(escaped.join("|"))
}

fn compile_unit_regex(pattern: String) -> Option<Regex> {
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(%pattern, error = %e, "failed to compile unit pattern");
            None
        }
    }
}

impl UnitPatterns {
    fn for_lang(lang: &LocaleTag) -> Option<Self> {
        let table = lexicon::units(lang)?;
        let (alphanumeric, symbolic): (Vec<&str>, Vec<&str>) = table
            .keys()
            .copied()
            .partition(|k| k.chars().all(char::is_alphanumeric));

        let symbolic = alternation(symbolic)
            .and_then(|alt| compile_unit_regex(format!(r"(?i){UNIT_NUMBER}\s*({alt})")));
        let alphanumeric = alternation(alphanumeric)
            .and_then(|alt| compile_unit_regex(format!(r"(?i){UNIT_NUMBER}\s*({alt})\b")));
        Some(Self {
            symbolic,
            alphanumeric,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Normalizer
// ─────────────────────────────────────────────────────────────────────────────

/// Normaliser bound to one locale.
///
/// Construction resolves the number speller, the rule-based fallback and the
/// unit patterns once; [`Normalizer::normalize`] is then pure and can be
/// shared across threads.
pub struct Normalizer {
    lang: LocaleTag,
    separators: NumberSeparators,
    date_format: DateFormat,
    speller: Option<Box<dyn Speller>>,
    rbnf: Option<RbnfEngine>,
    units: Option<UnitPatterns>,
}

impl Normalizer {
    pub fn new(lang: &str) -> Self {
        let lang = LocaleTag::new(lang);
        let speller = numbers::speller_for(&lang);
        let rbnf = if speller.is_some() {
            None
        } else {
            let engine = RbnfEngine::for_language(&lang);
            if engine.is_none() {
                tracing::debug!(lang = lang.primary(), "RBNF engine not available");
            }
            engine
        };
        Self {
            separators: NumberSeparators::for_lang(&lang),
            date_format: DateFormat::for_lang(&lang),
            units: UnitPatterns::for_lang(&lang),
            speller,
            rbnf,
            lang,
        }
    }

    pub fn lang(&self) -> &LocaleTag {
        &self.lang
    }

    /// Run every pass over `text`.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.normalize_dates_and_times(text);
        let text = split_word_digit(&text);
        let text = self.normalize_units(&text);
        text.split_whitespace()
            .map(|word| self.normalize_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ── Pass 1: dates and times ──────────────────────────────────────────────

    pub fn normalize_dates_and_times(&self, text: &str) -> String {
        let mut text = if self.lang.primary() == "en" {
            expand_am_pm(text)
        } else {
            text.to_string()
        };

        text = RE_TIME_H
            .replace_all(&text, |caps: &Captures| self.pronounce_h_time(caps))
            .into_owned();
        text = RE_TIME_COLON
            .replace_all(&text, |caps: &Captures| {
                let time = datetime::parse_time(&caps[1], &caps[2]);
                match (time, &self.speller) {
                    (Some(t), Some(speller)) => speller.time(t.hour(), t.minute()),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned();

        self.normalize_date(text)
    }

    fn pronounce_h_time(&self, caps: &Captures) -> String {
        let raw = &caps[0];
        let Some(speller) = &self.speller else {
            tracing::debug!(lang = self.lang.as_str(), time = raw, "no time speller");
            return raw.replace(['h', 'H'], " ");
        };
        match datetime::parse_time(&caps[1], &caps[2]) {
            Some(t) => speller.time(t.hour(), t.minute()),
            None => {
                tracing::warn!(time = raw, "failed to parse time string");
                raw.replace(['h', 'H'], " ")
            }
        }
    }

    /// Only the first numeric date is resolved; every copy of that exact
    /// string is replaced.
    fn normalize_date(&self, text: String) -> String {
        let Some(parts) = DateParts::find(&text) else {
            return text;
        };
        let resolved = parts.resolve(self.date_format);
        let Some(date) = resolved.to_date() else {
            tracing::warn!(
                date = parts.matched.as_str(),
                year = resolved.year,
                month = resolved.month,
                day = resolved.day,
                "could not parse date"
            );
            return text;
        };
        match &self.speller {
            Some(speller) => text.replace(&parts.matched, &speller.date(date)),
            None => {
                tracing::debug!(lang = self.lang.as_str(), %date, "no date speller");
                text
            }
        }
    }

    // ── Pass 3: units ────────────────────────────────────────────────────────

    pub fn normalize_units(&self, text: &str) -> String {
        let text = text.replace('º', "°");
        let Some(units) = &self.units else {
            return text;
        };
        let mut text = text;
        for re in [&units.symbolic, &units.alphanumeric].into_iter().flatten() {
            text = re
                .replace_all(&text, |caps: &Captures| self.pronounce_unit(caps))
                .into_owned();
        }
        text
    }

    fn pronounce_unit(&self, caps: &Captures) -> String {
        let (raw, symbol) = (&caps[1], &caps[2]);
        let Some(word) = lexicon::unit_word(&self.lang, symbol) else {
            return caps[0].to_string();
        };
        let Some(number) = canonical_unit_number(raw, self.separators) else {
            tracing::warn!(number = raw, unit = symbol, "rejected number before unit");
            return caps[0].to_string();
        };
        match self.pronounce(&number) {
            Some(spoken) => format!("{spoken} {word}"),
            None => caps[0].to_string(),
        }
    }

    // ── Pass 4: single words ─────────────────────────────────────────────────

    /// Normalise one whitespace-delimited word.
    pub fn normalize_word(&self, word: &str) -> String {
        if let Some(expanded) = self.lookup(word) {
            return expanded.to_string();
        }
        let (stripped, suffix) = strip_trailing_punctuation(word);
        if stripped.is_empty() {
            return word.to_string();
        }
        if stripped.len() < word.len() {
            if let Some(expanded) = self.lookup(stripped) {
                return format!("{expanded}{suffix}");
            }
        }

        if self.speller.is_some() && RE_FRACTION.is_match(stripped).unwrap_or(false) {
            return match numbers::pronounce_fraction(stripped, &self.lang) {
                Ok(spoken) => format!("{spoken}{suffix}"),
                Err(e) => {
                    tracing::error!(word, error = %e, "failed to pronounce fraction");
                    word.to_string()
                }
            };
        }

        if self.speller.is_some() {
            if let Some(number) = canonical_number(stripped, self.separators) {
                return match self.pronounce(&number) {
                    Some(spoken) => format!("{spoken}{suffix}"),
                    None => word.to_string(),
                };
            }
        } else if let Some(rbnf) = &self.rbnf {
            if stripped.bytes().all(|b| b.is_ascii_digit()) {
                let spoken = stripped
                    .parse::<u64>()
                    .map_err(|e| e.to_string())
                    .and_then(|n| rbnf.format_cardinal(n).map_err(|e| e.to_string()));
                return match spoken {
                    Ok(spoken) => format!("{spoken}{suffix}"),
                    Err(error) => {
                        tracing::error!(word, %error, "RBNF failed to pronounce number");
                        word.to_string()
                    }
                };
            }
        }
        word.to_string()
    }

    fn lookup(&self, word: &str) -> Option<&'static str> {
        lexicon::contraction(&self.lang, word).or_else(|| lexicon::title(&self.lang, word))
    }

    /// Spell a canonical number with the native speller.
    fn pronounce(&self, number: &str) -> Option<String> {
        let speller = self.speller.as_deref()?;
        match numbers::spell_decimal(speller, number) {
            Ok(spoken) => Some(spoken),
            Err(e) => {
                tracing::error!(number, error = %e, "failed to pronounce number");
                None
            }
        }
    }
}

/// Normalise `text` for `lang` (builds a throwaway [`Normalizer`]).
pub fn normalize(text: &str, lang: &str) -> String {
    Normalizer::new(lang).normalize(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_number_period_decimal() {
        let en = NumberSeparators::PERIOD_DECIMAL;
        assert_eq!(canonical_number("12345", en).as_deref(), Some("12345"));
        assert_eq!(canonical_number("0.5", en).as_deref(), Some("0.5"));
        assert_eq!(canonical_number("1,234", en).as_deref(), Some("1234"));
        assert_eq!(canonical_number("1,234,567.89", en).as_deref(), Some("1234567.89"));
        assert_eq!(canonical_number("-1,000", en).as_deref(), Some("-1000"));
        // Any group size: the word is numeric once the separator is gone.
        assert_eq!(canonical_number("1,5", en).as_deref(), Some("15"));
        assert_eq!(canonical_number("12,34", en).as_deref(), Some("1234"));
        assert_eq!(canonical_number("1.2.3", en), None);
        assert_eq!(canonical_number("abc", en), None);
    }

    #[test]
    fn test_canonical_number_comma_decimal() {
        let pt = NumberSeparators::COMMA_DECIMAL;
        assert_eq!(canonical_number("123.456,78", pt).as_deref(), Some("123456.78"));
        assert_eq!(canonical_number("1.23,5", pt).as_deref(), Some("123.5"));
        assert_eq!(canonical_number("1,88", pt).as_deref(), Some("1.88"));
        assert_eq!(canonical_number("1.234", pt).as_deref(), Some("1234"));
        // A lone period is always a thousands separator.
        assert_eq!(canonical_number("0.5", pt).as_deref(), Some("05"));
        assert_eq!(canonical_number("10.5", pt).as_deref(), Some("105"));
        assert_eq!(canonical_number("1,2,3", pt), None);
    }

    #[test]
    fn test_canonical_unit_number_groups() {
        let en = NumberSeparators::PERIOD_DECIMAL;
        assert_eq!(canonical_unit_number("1,234", en).as_deref(), Some("1234"));
        assert_eq!(canonical_unit_number("-3", en).as_deref(), Some("-3"));
        assert_eq!(canonical_unit_number("1,5", en), None);
        assert_eq!(canonical_unit_number("12,34.5", en), None);

        let pt = NumberSeparators::COMMA_DECIMAL;
        assert_eq!(canonical_unit_number("123.456,78", pt).as_deref(), Some("123456.78"));
        assert_eq!(canonical_unit_number("0,5", pt).as_deref(), Some("0.5"));
        assert_eq!(canonical_unit_number("0.5", pt).as_deref(), Some("0.5"));
    }

    #[test]
    fn test_word_numbers_follow_locale_separators() {
        assert_eq!(normalize("12,34", "en"), "one thousand two hundred and thirty four");
        assert_eq!(normalize("1.23,5", "pt"), "cento e vinte e três vírgula cinco");
        assert_eq!(normalize("0.5", "pt"), "cinco");
        assert_eq!(normalize("10.5", "de"), "einhundertfünf");
    }

    #[test]
    fn test_signed_number_before_unit() {
        let out = normalize("-3°C", "en");
        assert_eq!(out, "minus three degrees celsius", "got: {}", out);
        let out = normalize("it was -3ºC outside", "en");
        assert_eq!(out, "it was minus three degrees celsius outside", "got: {}", out);
    }

    #[test]
    fn test_number_too_large_kept() {
        // 10^15 and above have no spelling and stay as digits.
        assert_eq!(normalize("1000000000000000", "en"), "1000000000000000");
        assert_eq!(
            normalize("999999999999999", "en"),
            "nine hundred and ninety nine trillion nine hundred and ninety nine billion \
             nine hundred and ninety nine million nine hundred and ninety nine thousand \
             nine hundred and ninety nine"
        );
    }

    #[test]
    fn test_split_word_digit() {
        assert_eq!(split_word_digit("sub-23 team"), "sub 23 team");
        assert_eq!(split_word_digit("well-known"), "well-known");
    }

    #[test]
    fn test_am_pm() {
        assert_eq!(expand_am_pm("at 10am"), "at 10 A M");
        assert_eq!(expand_am_pm("at 7 PM."), "at 7 P M.");
        assert_eq!(expand_am_pm("ma'am, I am"), "ma'am, I am");
    }

    #[test]
    fn test_mixed_english_sentence() {
        let out = normalize("I'm Dr. Prof. 3/3 0.5% of 12345€, 5ft, and 10kg", "en");
        assert_eq!(
            out,
            "I am Doctor Professor three thirds zero point five per cent of twelve thousand \
             three hundred and forty five euros, five feet, and ten kilograms",
            "got: {}",
            out
        );
    }

    #[test]
    fn test_portuguese_thousands_and_decimal() {
        let out = normalize("O lucro foi de 123.456,78€.", "pt");
        assert_eq!(
            out,
            "O lucro foi de cento e vinte e três mil quatrocentos e cinquenta e seis \
             vírgula sete oito euros.",
            "got: {}",
            out
        );
    }

    #[test]
    fn test_portuguese_decimal_comma() {
        let out = normalize("Agora, tem 1,88 metros.", "pt");
        assert_eq!(out, "Agora, tem um vírgula oito oito metros.", "got: {}", out);
    }

    #[test]
    fn test_date_mdy_vs_dmy() {
        let us = normalize("The date is 08/03/2025", "en-US");
        assert_eq!(us, "The date is sunday, august third, twenty twenty five", "got: {}", us);

        let pt = normalize("A data é 03/08/2025", "pt");
        assert_eq!(
            pt,
            "A data é domingo, três de agosto de dois mil e vinte e cinco",
            "got: {}",
            pt
        );

        // en-GB reads the same digits day-first.
        let gb = normalize("08/03/2025", "en-GB");
        assert_eq!(gb, "saturday, march eighth, twenty twenty five", "got: {}", gb);
    }

    #[test]
    fn test_unambiguous_day_overrides_locale() {
        let out = normalize("due 15/05/2025", "en-US");
        assert_eq!(out, "due thursday, may fifteenth, twenty twenty five", "got: {}", out);
    }

    #[test]
    fn test_invalid_date_kept() {
        let out = normalize("on 31/02/2025", "pt");
        assert!(out.contains("31/02/2025"), "got: {}", out);
    }

    #[test]
    fn test_times() {
        assert_eq!(normalize("at 19h30", "en"), "at nineteen thirty");
        assert_eq!(normalize("às 14h30", "pt"), "às catorze e trinta");
        assert_eq!(normalize("at 10:05", "en"), "at ten oh five");
        // Out of range: the h separator becomes a space, digits are spelled.
        assert_eq!(normalize("25h99", "en"), "twenty five ninety nine");
    }

    #[test]
    fn test_units_degree_and_case() {
        assert_eq!(normalize("20ºC", "en"), "twenty degrees celsius");
        assert_eq!(normalize("5 KM", "en"), "five kilometers");
        assert_eq!(normalize("5 men", "en"), "five men");
    }

    #[test]
    fn test_trailing_punctuation_kept() {
        assert_eq!(normalize("I have 3.", "en"), "I have three.");
        assert_eq!(normalize("I'm,", "en"), "I am,");
    }

    #[test]
    fn test_rbnf_fallback() {
        assert_eq!(normalize("ho 21 anni", "it"), "ho ventuno anni");
        // Only all-digit tokens use the fallback.
        assert_eq!(normalize("1.5", "it"), "1.5");
    }

    #[test]
    fn test_unknown_language_passthrough() {
        assert_eq!(normalize("abc 123 3/4", "xx"), "abc 123 3/4");
    }

    #[test]
    fn test_lexicon_identity() {
        for lang in ["en", "pt", "es", "fr", "de"] {
            let tag = LocaleTag::new(lang);
            let norm = Normalizer::new(lang);
            let tables = [lexicon::contraction_table(&tag), lexicon::title_table(&tag)];
            for table in tables.into_iter().flatten() {
                for (word, expansion) in table {
                    assert_eq!(norm.normalize(word), *expansion, "{lang}: {word}");
                }
            }
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize("", "en"), "");
        assert_eq!(normalize("   ", "en"), "");
    }
}
