//! Locale tags: primary-subtag lookup, number/date conventions and
//! distance-based matching against a fixed list of supported tags.
//!
//! The distance metric follows the shape of CLDR language matching: a
//! different language costs far more than a different script, which costs
//! far more than a different region.  Tags are maximised with a small
//! likely-subtags table before comparison, so `en` and `en-US` are identical
//! while `en` and `en-GB` differ only by region.

use std::fmt;

use crate::error::LangError;

/// Candidates farther away than this are rejected by [`match_lang`].
pub const MATCH_THRESHOLD: u32 = 10;

const LANGUAGE_DISTANCE: u32 = 80;
const SCRIPT_DISTANCE: u32 = 40;
const REGION_DISTANCE: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// LocaleTag
// ─────────────────────────────────────────────────────────────────────────────

/// A hyphen-delimited locale tag such as `en-US` or `pt`.
///
/// Construction never fails: anything before the first `-` is the primary
/// subtag, the rest is kept verbatim as the suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    full: String,
    primary: String,
}

impl LocaleTag {
    pub fn new(tag: &str) -> Self {
        let full = tag.trim().replace('_', "-");
        let primary = full.split('-').next().unwrap_or_default().to_lowercase();
        Self { full, primary }
    }

    /// Lowercase primary language subtag (`"en"` for `"en-US"`).
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The tag as given (underscores folded to hyphens).
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Region/script suffix after the primary subtag, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.full.split_once('-').map(|(_, rest)| rest)
    }

    /// True when the region subtag equals `region` (case-insensitive).
    pub fn has_region(&self, region: &str) -> bool {
        self.full
            .split('-')
            .skip(1)
            .any(|s| s.len() == 2 && s.eq_ignore_ascii_case(region))
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl From<&str> for LocaleTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Number and date conventions
// ─────────────────────────────────────────────────────────────────────────────

/// Languages that write `1.234,5` rather than `1,234.5`.
const COMMA_DECIMAL_LANGS: &[&str] = &["pt", "es", "fr", "de"];

/// Decimal and thousands separators for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSeparators {
    pub decimal: char,
    pub thousands: char,
}

impl NumberSeparators {
    pub const PERIOD_DECIMAL: Self = Self { decimal: '.', thousands: ',' };
    pub const COMMA_DECIMAL: Self = Self { decimal: ',', thousands: '.' };

    pub fn for_lang(lang: &LocaleTag) -> Self {
        if COMMA_DECIMAL_LANGS.contains(&lang.primary()) {
            Self::COMMA_DECIMAL
        } else {
            Self::PERIOD_DECIMAL
        }
    }
}

/// Order of day and month in an ambiguous numeric date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// month / day / year
    Mdy,
    /// day / month / year
    Dmy,
}

impl DateFormat {
    /// `en-US` reads dates month-first, everybody else day-first.
    pub fn for_lang(lang: &LocaleTag) -> Self {
        if lang.as_str().eq_ignore_ascii_case("en-us") {
            DateFormat::Mdy
        } else {
            DateFormat::Dmy
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BCP 47 parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedTag {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

fn is_alpha(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_alnum(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_digits(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Parse `language[-script][-region](-variant)*(-ext)*[-x-private]`.
///
/// Variants, extensions and private-use subtags are validated but not kept:
/// they do not take part in distance computation.
fn parse_tag(tag: &str) -> Result<ParsedTag, LangError> {
    let invalid = || LangError::InvalidTag(tag.to_string());
    let mut subtags = tag.split(['-', '_']).peekable();

    let language = subtags.next().ok_or_else(invalid)?;
    let lang_ok = is_alpha(language) && matches!(language.len(), 2 | 3 | 5..=8);
    if !lang_ok {
        return Err(invalid());
    }
    let mut parsed = ParsedTag {
        language: canonical_language(&language.to_ascii_lowercase()).to_string(),
        script: None,
        region: None,
    };

    if let Some(s) = subtags.peek() {
        if s.len() == 4 && is_alpha(s) {
            let mut script = s.to_ascii_lowercase();
            script[..1].make_ascii_uppercase();
            parsed.script = Some(script);
            subtags.next();
        }
    }
    if let Some(s) = subtags.peek() {
        if (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && is_digits(s)) {
            parsed.region = Some(s.to_ascii_uppercase());
            subtags.next();
        }
    }

    while let Some(s) = subtags.next() {
        if s.is_empty() {
            return Err(invalid());
        }
        if s.len() == 1 && is_alnum(s) {
            // Extension or private use: at least one following subtag.
            let private = s.eq_ignore_ascii_case("x");
            let min_len = if private { 1 } else { 2 };
            let mut count = 0;
            for rest in subtags.by_ref() {
                if rest.len() < min_len || rest.len() > 8 || !is_alnum(rest) {
                    return Err(invalid());
                }
                count += 1;
            }
            return if count > 0 { Ok(parsed) } else { Err(invalid()) };
        }
        let variant = is_alnum(s)
            && ((5..=8).contains(&s.len())
                || (s.len() == 4 && s.starts_with(|c: char| c.is_ascii_digit())));
        if !variant {
            return Err(invalid());
        }
    }
    Ok(parsed)
}

/// Deprecated or macrolanguage codes folded to the code used for matching.
fn canonical_language(lang: &str) -> &str {
    match lang {
        "cmn" => "zh",
        "iw" => "he",
        "in" => "id",
        "ji" => "yi",
        "jw" => "jv",
        other => other,
    }
}

/// Default script for languages not usually written in Latin script.
fn likely_script(lang: &str) -> &'static str {
    match lang {
        "ru" | "uk" | "bg" | "mk" | "sr" | "be" | "kk" | "ky" | "tt" | "ba" | "cv" | "nog"
        | "mn" | "tg" => "Cyrl",
        "el" | "grc" => "Grek",
        "he" | "yi" => "Hebr",
        "ar" | "fa" | "ur" | "sd" | "ug" | "ps" => "Arab",
        "hi" | "mr" | "ne" | "kok" | "sa" => "Deva",
        "bn" | "as" | "bpy" => "Beng",
        "pa" => "Guru",
        "gu" => "Gujr",
        "or" => "Orya",
        "ta" => "Taml",
        "te" => "Telu",
        "kn" => "Knda",
        "ml" => "Mlym",
        "si" => "Sinh",
        "th" => "Thai",
        "my" | "shn" => "Mymr",
        "ka" => "Geor",
        "hy" | "hyw" => "Armn",
        "am" | "ti" => "Ethi",
        "ja" => "Jpan",
        "ko" => "Kore",
        "zh" | "hak" => "Hans",
        "yue" => "Hant",
        _ => "Latn",
    }
}

/// Default region for languages whose unqualified tag implies one.
fn likely_region(lang: &str) -> Option<&'static str> {
    let region = match lang {
        "en" => "US",
        "pt" => "BR",
        "es" | "ca" | "gl" | "eu" => "ES",
        "fr" => "FR",
        "de" => "DE",
        "it" => "IT",
        "nl" => "NL",
        "ru" => "RU",
        "zh" => "CN",
        "yue" => "HK",
        "sv" => "SE",
        "da" => "DK",
        "nb" | "no" | "nn" => "NO",
        "fi" => "FI",
        "pl" => "PL",
        "cs" => "CZ",
        "sk" => "SK",
        "uk" => "UA",
        "el" => "GR",
        "tr" => "TR",
        "ar" => "EG",
        "fa" => "IR",
        "hi" => "IN",
        "ja" => "JP",
        "ko" => "KR",
        "vi" => "VN",
        "he" => "IL",
        "ro" => "RO",
        "hu" => "HU",
        _ => return None,
    };
    Some(region)
}

/// Distance between two different languages that are close enough to stand
/// in for each other.
fn close_language_distance(desired: &str, supported: &str) -> Option<u32> {
    let pair = |a: &str, b: &str| {
        (desired == a && supported == b) || (desired == b && supported == a)
    };
    if pair("nb", "no") {
        Some(1)
    } else if pair("bs", "hr") || pair("bs", "sr") || pair("hr", "sr") {
        Some(4)
    } else if pair("da", "nb") || pair("da", "no") {
        Some(8)
    } else if pair("nn", "nb") || pair("nn", "no") {
        Some(10)
    } else {
        None
    }
}

/// Distance between a desired and a supported tag. 0 means identical after
/// maximisation; larger is worse.
pub fn tag_distance(desired: &str, supported: &str) -> Result<u32, LangError> {
    let d = parse_tag(desired)?;
    let s = parse_tag(supported)?;

    let mut distance = 0;
    if d.language != s.language {
        distance += close_language_distance(&d.language, &s.language).unwrap_or(LANGUAGE_DISTANCE);
    }

    let d_script = d.script.as_deref().unwrap_or_else(|| likely_script(&d.language));
    let s_script = s.script.as_deref().unwrap_or_else(|| likely_script(&s.language));
    if d_script != s_script {
        distance += SCRIPT_DISTANCE;
    }

    let d_region = d.region.as_deref().or_else(|| likely_region(&d.language));
    let s_region = s.region.as_deref().or_else(|| likely_region(&s.language));
    if let (Some(a), Some(b)) = (d_region, s_region) {
        if a != b {
            distance += REGION_DISTANCE;
        }
    }
    Ok(distance)
}

// ─────────────────────────────────────────────────────────────────────────────
// Matching
// ─────────────────────────────────────────────────────────────────────────────

/// Coarser forms of a candidate tag: the tag itself, `primary-second`, and
/// `primary`, in that order.
fn candidate_forms(candidate: &str) -> Vec<String> {
    let parts: Vec<&str> = candidate.split('-').collect();
    let mut forms = vec![candidate.to_string()];
    if parts.len() > 2 {
        forms.push(format!("{}-{}", parts[0], parts[1]));
    }
    if parts.len() > 1 {
        forms.push(parts[0].to_string());
    }
    forms
}

/// Resolve `target` to the closest tag in `candidates`.
///
/// An exact (case-insensitive) match wins immediately.  Otherwise each
/// candidate is compared through progressively coarser forms until a
/// distance can be computed; candidates that cannot be compared at all are
/// skipped.  The first candidate with the smallest distance wins, provided
/// that distance is at most [`MATCH_THRESHOLD`].
pub fn match_lang<S: AsRef<str>>(target: &str, candidates: &[S]) -> Result<String, LangError> {
    if let Some(exact) = candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|c| c.eq_ignore_ascii_case(target))
    {
        return Ok(exact.to_string());
    }

    let mut best: Option<(&str, u32)> = None;
    for candidate in candidates.iter().map(AsRef::as_ref) {
        let distance = candidate_forms(candidate)
            .iter()
            .find_map(|form| tag_distance(target, form).ok());
        let Some(distance) = distance else {
            continue;
        };
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    match best {
        Some((lang, distance)) if distance <= MATCH_THRESHOLD => {
            tracing::debug!(requested = target, matched = lang, distance, "matched language");
            Ok(lang.to_string())
        }
        _ => Err(LangError::UnsupportedLanguage(target.to_string())),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_tag_primary() {
        let tag = LocaleTag::new("pt-BR");
        assert_eq!(tag.primary(), "pt");
        assert_eq!(tag.suffix(), Some("BR"));
        assert!(tag.has_region("br"));
        assert_eq!(LocaleTag::new("EN").primary(), "en");
        assert_eq!(LocaleTag::new("en_GB").as_str(), "en-GB");
        assert_eq!(LocaleTag::new("de").suffix(), None);
    }

    #[test]
    fn test_number_separators() {
        for lang in ["pt", "es-MX", "fr-CA", "de"] {
            assert_eq!(NumberSeparators::for_lang(&lang.into()), NumberSeparators::COMMA_DECIMAL);
        }
        for lang in ["en", "en-US", "it", "nl"] {
            assert_eq!(NumberSeparators::for_lang(&lang.into()), NumberSeparators::PERIOD_DECIMAL);
        }
    }

    #[test]
    fn test_date_format() {
        assert_eq!(DateFormat::for_lang(&"en-US".into()), DateFormat::Mdy);
        assert_eq!(DateFormat::for_lang(&"en-us".into()), DateFormat::Mdy);
        assert_eq!(DateFormat::for_lang(&"en-GB".into()), DateFormat::Dmy);
        assert_eq!(DateFormat::for_lang(&"en".into()), DateFormat::Dmy);
        assert_eq!(DateFormat::for_lang(&"pt".into()), DateFormat::Dmy);
    }

    #[test]
    fn test_parse_tag_rejects_malformed() {
        assert!(parse_tag("piqd").is_err());
        assert!(parse_tag("").is_err());
        assert!(parse_tag("en--us").is_err());
        assert!(parse_tag("en-x").is_err());
        assert!(parse_tag("en-gb-x-rp").is_ok());
        assert!(parse_tag("cmn-latn-pinyin").is_ok());
        assert!(parse_tag("es-419").is_ok());
        assert!(parse_tag("vi-vn-x-central").is_ok());
    }

    #[test]
    fn test_tag_distance() {
        assert_eq!(tag_distance("en", "en-US").unwrap(), 0);
        assert_eq!(tag_distance("en-GB", "en-us").unwrap(), REGION_DISTANCE);
        assert_eq!(tag_distance("pt-PT", "pt").unwrap(), REGION_DISTANCE);
        assert_eq!(tag_distance("sr-Latn", "sr").unwrap(), SCRIPT_DISTANCE);
        assert_eq!(tag_distance("nb", "no").unwrap(), 1);
        assert!(tag_distance("xx", "en").unwrap() >= LANGUAGE_DISTANCE);
    }

    #[test]
    fn test_match_exact() {
        let langs = ["en-us", "pt", "fr"];
        assert_eq!(match_lang("pt", &langs).unwrap(), "pt");
        assert_eq!(match_lang("EN-US", &langs).unwrap(), "en-us");
    }

    #[test]
    fn test_match_closest() {
        let langs = ["en-gb", "en-us", "pt"];
        assert_eq!(match_lang("en", &langs).unwrap(), "en-us");
        assert_eq!(match_lang("en-AU", &langs).unwrap(), "en-gb");
        assert_eq!(match_lang("pt-PT", &langs).unwrap(), "pt");
    }

    #[test]
    fn test_match_skips_uncomparable_candidates() {
        let langs = ["piqd", "de"];
        assert_eq!(match_lang("de-AT", &langs).unwrap(), "de");
    }

    #[test]
    fn test_match_rejects_far_languages() {
        let langs = ["en-us", "pt", "fr"];
        let err = match_lang("xx-ZZ", &langs).unwrap_err();
        assert_eq!(err, LangError::UnsupportedLanguage("xx-ZZ".to_string()));
        assert_eq!(err.to_string(), "unsupported language code: xx-ZZ");
    }

    #[test]
    fn test_match_empty_candidates() {
        let langs: [&str; 0] = [];
        assert!(match_lang("en", &langs).is_err());
    }
}
