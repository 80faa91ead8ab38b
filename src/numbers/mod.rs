//! Spoken forms of numbers, fractions, times and dates.
//!
//! Each supported language implements [`Speller`].  Languages without a
//! native speller may still have a rule-based cardinal formatter
//! ([`RbnfEngine`]) that the normaliser uses for plain digit strings.
//!
//! Numbers are handled as canonical decimal strings (`-?\d+(\.\d+)?`) rather
//! than floats so that `0.50` keeps its trailing zero and nothing is lost to
//! binary rounding.  Decimal digits are read one by one after the language's
//! decimal word, e.g. `3.14` → "three point one four".

mod de;
mod en;
mod es;
mod fr;
mod pt;
mod rbnf;

use chrono::NaiveDate;

use crate::error::NumberError;
use crate::lang::LocaleTag;

pub use rbnf::RbnfEngine;

/// Largest integer part any speller accepts (exclusive).
pub const MAX_SPELLABLE: u64 = 1_000_000_000_000_000;

/// Language-specific spelling of numbers, fractions, times and dates.
pub trait Speller: Send + Sync {
    /// Cardinal number, `n < MAX_SPELLABLE`.
    fn cardinal(&self, n: u64) -> String;

    /// Word placed before negative numbers.
    fn minus_word(&self) -> &'static str;

    /// Word placed between the integer and the decimal digits.
    fn decimal_word(&self) -> &'static str;

    /// A single digit read inside the decimal part.
    fn digit(&self, d: u8) -> String {
        self.cardinal(u64::from(d))
    }

    /// `numerator / denominator`, `denominator > 0`.
    fn fraction(&self, numerator: u64, denominator: u64) -> String;

    /// A 24-hour clock time, `hour < 24`, `minute < 60`.
    fn time(&self, hour: u32, minute: u32) -> String;

    /// A full calendar date.
    fn date(&self, date: NaiveDate) -> String;
}

/// The native speller for a locale, if the language has one.
pub fn speller_for(lang: &LocaleTag) -> Option<Box<dyn Speller>> {
    match lang.primary() {
        "en" => Some(Box::new(en::English)),
        "pt" => Some(Box::new(pt::Portuguese { brazilian: lang.has_region("br") })),
        "es" => Some(Box::new(es::Spanish)),
        "fr" => Some(Box::new(fr::French)),
        "de" => Some(Box::new(de::German)),
        _ => None,
    }
}

/// True for `-?\d+(\.\d+)?`.
pub fn is_plain_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

/// Spell a canonical decimal number (`-?\d+(\.\d+)?`).
pub fn pronounce_number(value: &str, lang: &LocaleTag) -> Result<String, NumberError> {
    let speller =
        speller_for(lang).ok_or_else(|| NumberError::UnsupportedLanguage(lang.to_string()))?;
    spell_decimal(speller.as_ref(), value)
}

/// Spell a canonical decimal number with a given speller.
pub fn spell_decimal(speller: &dyn Speller, value: &str) -> Result<String, NumberError> {
    if !is_plain_number(value) {
        return Err(NumberError::Malformed(value.to_string()));
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };

    let int: u64 = int_part
        .parse()
        .map_err(|_| NumberError::TooLarge(value.to_string()))?;
    if int >= MAX_SPELLABLE {
        return Err(NumberError::TooLarge(value.to_string()));
    }

    let mut words = Vec::new();
    if negative {
        words.push(speller.minus_word().to_string());
    }
    words.push(speller.cardinal(int));
    if let Some(frac) = frac_part {
        words.push(speller.decimal_word().to_string());
        words.extend(frac.bytes().map(|b| speller.digit(b - b'0')));
    }
    Ok(words.join(" "))
}

/// Spell a fraction written `numerator/denominator`.
pub fn pronounce_fraction(fraction: &str, lang: &LocaleTag) -> Result<String, NumberError> {
    let malformed = || NumberError::Malformed(fraction.to_string());
    let (num, den) = fraction.split_once('/').ok_or_else(malformed)?;
    let whole = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !whole(num) || !whole(den) {
        return Err(malformed());
    }
    let num: u64 = num.parse().map_err(|_| NumberError::TooLarge(fraction.to_string()))?;
    let den: u64 = den.parse().map_err(|_| NumberError::TooLarge(fraction.to_string()))?;
    if den == 0 {
        return Err(NumberError::ZeroDenominator(fraction.to_string()));
    }
    if num >= MAX_SPELLABLE || den >= MAX_SPELLABLE {
        return Err(NumberError::TooLarge(fraction.to_string()));
    }
    let speller =
        speller_for(lang).ok_or_else(|| NumberError::UnsupportedLanguage(lang.to_string()))?;
    Ok(speller.fraction(num, den))
}

/// Split `n` into base-1000 groups, least significant first.
pub(crate) fn thousands_groups(mut n: u64) -> Vec<u64> {
    let mut groups = Vec::new();
    loop {
        groups.push(n % 1000);
        n /= 1000;
        if n == 0 {
            return groups;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
