//! Rule-based cardinal spelling for languages without a native speller.
//!
//! Rule sets follow the ICU spell-out notation, restricted to what the
//! bundled sets use:
//!
//! | token        | meaning                                                |
//! |--------------|--------------------------------------------------------|
//! | `<<`         | quotient `n / divisor`, same rule set                  |
//! | `>>`         | remainder `n % divisor`, same rule set                 |
//! | `<%name<`    | quotient, formatted with rule set `name`               |
//! | `>%name>`    | remainder, formatted with rule set `name`              |
//! | `=%name=`    | `n` itself, formatted with rule set `name`             |
//! | `[...]`      | omitted when the remainder is zero                     |
//!
//! The divisor of a rule is the largest power of ten not above its base.
//! For a number `n` the rule with the greatest base `<= n` applies.

use std::collections::HashMap;

use crate::error::NumberError;
use crate::lang::LocaleTag;

use super::MAX_SPELLABLE;

/// Name of the entry rule set of every language.
const CARDINAL: &str = "spellout-cardinal";

const MAX_DEPTH: usize = 32;

type RawRuleSet = (&'static str, &'static [(u64, &'static str)]);

// ─── Italian ─────────────────────────────────────────────────────────────────

const RULES_IT: &[RawRuleSet] = &[
    (
        CARDINAL,
        &[
            (0, "zero"),
            (1, "uno"),
            (2, "due"),
            (3, "tre"),
            (4, "quattro"),
            (5, "cinque"),
            (6, "sei"),
            (7, "sette"),
            (8, "otto"),
            (9, "nove"),
            (10, "dieci"),
            (11, "undici"),
            (12, "dodici"),
            (13, "tredici"),
            (14, "quattordici"),
            (15, "quindici"),
            (16, "sedici"),
            (17, "diciassette"),
            (18, "diciotto"),
            (19, "diciannove"),
            (20, "vent>%%i>"),
            (30, "trent>%%a>"),
            (40, "quarant>%%a>"),
            (50, "cinquant>%%a>"),
            (60, "sessant>%%a>"),
            (70, "settant>%%a>"),
            (80, "ottant>%%a>"),
            (90, "novant>%%a>"),
            (100, "cent>%%o>"),
            (200, "<<cent>%%o>"),
            (1000, "mille[>>]"),
            (2000, "<<mila[>>]"),
            (1_000_000, "un milione[ >>]"),
            (2_000_000, "<< milioni[ >>]"),
            (1_000_000_000, "un miliardo[ >>]"),
            (2_000_000_000, "<< miliardi[ >>]"),
            (1_000_000_000_000, "un bilione[ >>]"),
            (2_000_000_000_000, "<< bilioni[ >>]"),
        ],
    ),
    (
        "%i",
        &[
            (0, "i"),
            (1, "uno"),
            (2, "idue"),
            (3, "itré"),
            (4, "iquattro"),
            (5, "icinque"),
            (6, "isei"),
            (7, "isette"),
            (8, "otto"),
            (9, "inove"),
        ],
    ),
    (
        "%a",
        &[
            (0, "a"),
            (1, "uno"),
            (2, "adue"),
            (3, "atré"),
            (4, "aquattro"),
            (5, "acinque"),
            (6, "asei"),
            (7, "asette"),
            (8, "otto"),
            (9, "anove"),
        ],
    ),
    (
        "%o",
        &[
            (0, "o"),
            (1, "o=%spellout-cardinal="),
            (8, "=%spellout-cardinal="),
            (9, "o=%spellout-cardinal="),
            (80, "=%spellout-cardinal="),
            (90, "o=%spellout-cardinal="),
        ],
    ),
];

// ─── Dutch ───────────────────────────────────────────────────────────────────

const RULES_NL: &[RawRuleSet] = &[
    (
        CARDINAL,
        &[
            (0, "nul"),
            (1, "een"),
            (2, "twee"),
            (3, "drie"),
            (4, "vier"),
            (5, "vijf"),
            (6, "zes"),
            (7, "zeven"),
            (8, "acht"),
            (9, "negen"),
            (10, "tien"),
            (11, "elf"),
            (12, "twaalf"),
            (13, "dertien"),
            (14, "veertien"),
            (15, "vijftien"),
            (16, "zestien"),
            (17, "zeventien"),
            (18, "achttien"),
            (19, "negentien"),
            (20, "[>%%en>]twintig"),
            (30, "[>%%en>]dertig"),
            (40, "[>%%en>]veertig"),
            (50, "[>%%en>]vijftig"),
            (60, "[>%%en>]zestig"),
            (70, "[>%%en>]zeventig"),
            (80, "[>%%en>]tachtig"),
            (90, "[>%%en>]negentig"),
            (100, "honderd[>>]"),
            (200, "<<honderd[>>]"),
            (1000, "duizend[>>]"),
            (2000, "<<duizend[>>]"),
            (1_000_000, "een miljoen[ >>]"),
            (2_000_000, "<< miljoen[ >>]"),
            (1_000_000_000, "een miljard[ >>]"),
            (2_000_000_000, "<< miljard[ >>]"),
            (1_000_000_000_000, "een biljoen[ >>]"),
            (2_000_000_000_000, "<< biljoen[ >>]"),
        ],
    ),
    (
        "%en",
        &[
            (1, "=%spellout-cardinal=en"),
            (2, "tweeën"),
            (3, "drieën"),
            (4, "=%spellout-cardinal=en"),
        ],
    ),
];

// ─── Catalan ─────────────────────────────────────────────────────────────────

const RULES_CA: &[RawRuleSet] = &[(
    CARDINAL,
    &[
        (0, "zero"),
        (1, "u"),
        (2, "dos"),
        (3, "tres"),
        (4, "quatre"),
        (5, "cinc"),
        (6, "sis"),
        (7, "set"),
        (8, "vuit"),
        (9, "nou"),
        (10, "deu"),
        (11, "onze"),
        (12, "dotze"),
        (13, "tretze"),
        (14, "catorze"),
        (15, "quinze"),
        (16, "setze"),
        (17, "disset"),
        (18, "divuit"),
        (19, "dinou"),
        (20, "vint[-i->>]"),
        (30, "trenta[->>]"),
        (40, "quaranta[->>]"),
        (50, "cinquanta[->>]"),
        (60, "seixanta[->>]"),
        (70, "setanta[->>]"),
        (80, "vuitanta[->>]"),
        (90, "noranta[->>]"),
        (100, "cent[ >>]"),
        (200, "<<-cents[ >>]"),
        (1000, "mil[ >>]"),
        (2000, "<< mil[ >>]"),
        (1_000_000, "un milió[ >>]"),
        (2_000_000, "<< milions[ >>]"),
        (1_000_000_000_000, "un bilió[ >>]"),
        (2_000_000_000_000, "<< bilions[ >>]"),
    ],
)];

// ─── Galician ────────────────────────────────────────────────────────────────

const RULES_GL: &[RawRuleSet] = &[(
    CARDINAL,
    &[
        (0, "cero"),
        (1, "un"),
        (2, "dous"),
        (3, "tres"),
        (4, "catro"),
        (5, "cinco"),
        (6, "seis"),
        (7, "sete"),
        (8, "oito"),
        (9, "nove"),
        (10, "dez"),
        (11, "once"),
        (12, "doce"),
        (13, "trece"),
        (14, "catorce"),
        (15, "quince"),
        (16, "dezaseis"),
        (17, "dezasete"),
        (18, "dezaoito"),
        (19, "dezanove"),
        (20, "vinte[ e >>]"),
        (30, "trinta[ e >>]"),
        (40, "corenta[ e >>]"),
        (50, "cincuenta[ e >>]"),
        (60, "sesenta[ e >>]"),
        (70, "setenta[ e >>]"),
        (80, "oitenta[ e >>]"),
        (90, "noventa[ e >>]"),
        (100, "cen"),
        (101, "cento >>"),
        (200, "douscentos[ >>]"),
        (300, "trescentos[ >>]"),
        (400, "catrocentos[ >>]"),
        (500, "quinientos[ >>]"),
        (600, "seiscentos[ >>]"),
        (700, "setecentos[ >>]"),
        (800, "oitocentos[ >>]"),
        (900, "novecentos[ >>]"),
        (1000, "mil[ >>]"),
        (2000, "<< mil[ >>]"),
        (1_000_000, "un millón[ >>]"),
        (2_000_000, "<< millóns[ >>]"),
        (1_000_000_000_000, "un billón[ >>]"),
        (2_000_000_000_000, "<< billóns[ >>]"),
    ],
)];

// ─── Engine ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Quotient(Option<String>),
    Remainder(Option<String>),
    Whole(String),
    Optional(Vec<Piece>),
}

#[derive(Debug, Clone)]
struct Rule {
    base: u64,
    divisor: u64,
    body: Vec<Piece>,
}

/// Compiled rule sets for one language.
#[derive(Debug, Clone)]
pub struct RbnfEngine {
    lang: String,
    sets: HashMap<String, Vec<Rule>>,
}

fn divisor_for(base: u64) -> u64 {
    let mut divisor = 1;
    while divisor <= base / 10 {
        divisor *= 10;
    }
    divisor
}

/// Rule set reference inside a substitution: empty means "same set".
fn set_name(raw: &str) -> Option<String> {
    let name = raw.trim_start_matches('%');
    (!name.is_empty()).then(|| name.to_string())
}

fn parse_body(body: &str) -> Result<Vec<Piece>, NumberError> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut chars = body.chars();

    let flush = |text: &mut String, pieces: &mut Vec<Piece>| {
        if !text.is_empty() {
            pieces.push(Piece::Text(std::mem::take(text)));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '<' | '>' | '=' => {
                flush(&mut text, &mut pieces);
                let inner: String = chars.by_ref().take_while(|&d| d != c).collect();
                let piece = match c {
                    '<' => Piece::Quotient(set_name(&inner)),
                    '>' => Piece::Remainder(set_name(&inner)),
                    _ => Piece::Whole(
                        set_name(&inner)
                            .ok_or_else(|| NumberError::Rules(format!("bare == in {body:?}")))?,
                    ),
                };
                pieces.push(piece);
            }
            '[' => {
                flush(&mut text, &mut pieces);
                let inner: String = chars.by_ref().take_while(|&d| d != ']').collect();
                pieces.push(Piece::Optional(parse_body(&inner)?));
            }
            _ => text.push(c),
        }
    }
    flush(&mut text, &mut pieces);
    Ok(pieces)
}

fn compile(raw: &[RawRuleSet]) -> Result<HashMap<String, Vec<Rule>>, NumberError> {
    let mut sets = HashMap::new();
    for (name, rules) in raw {
        let mut compiled = rules
            .iter()
            .map(|&(base, body)| {
                Ok(Rule {
                    base,
                    divisor: divisor_for(base),
                    body: parse_body(body)?,
                })
            })
            .collect::<Result<Vec<_>, NumberError>>()?;
        compiled.sort_by_key(|r| r.base);
        sets.insert(name.trim_start_matches('%').to_string(), compiled);
    }
    Ok(sets)
}

impl RbnfEngine {
    /// Rule-based speller for `lang`, if a rule set is bundled.
    pub fn for_language(lang: &LocaleTag) -> Option<Self> {
        let raw = match lang.primary() {
            "it" => RULES_IT,
            "nl" => RULES_NL,
            "ca" => RULES_CA,
            "gl" => RULES_GL,
            _ => return None,
        };
        match compile(raw) {
            Ok(sets) => Some(Self {
                lang: lang.primary().to_string(),
                sets,
            }),
            Err(e) => {
                tracing::error!(
                    lang = lang.as_str(),
                    error = %e,
                    "bundled number rules failed to compile"
                );
                None
            }
        }
    }

    /// Languages with a bundled rule set.
    pub fn languages() -> &'static [&'static str] {
        &["ca", "gl", "it", "nl"]
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Spell a non-negative integer.
    pub fn format_cardinal(&self, n: u64) -> Result<String, NumberError> {
        if n >= MAX_SPELLABLE {
            return Err(NumberError::TooLarge(n.to_string()));
        }
        self.format(CARDINAL, n, 0)
    }

    fn format(&self, set: &str, n: u64, depth: usize) -> Result<String, NumberError> {
        if depth > MAX_DEPTH {
            return Err(NumberError::Rules(format!("recursion limit in rule set {set}")));
        }
        let rules = self
            .sets
            .get(set)
            .ok_or_else(|| NumberError::Rules(format!("unknown rule set {set}")))?;
        let rule = rules
            .iter()
            .rev()
            .find(|r| r.base <= n)
            .ok_or_else(|| NumberError::Rules(format!("no rule for {n} in {set}")))?;

        let mut out = String::new();
        self.render(&rule.body, rule, set, n, depth, &mut out)?;
        Ok(out)
    }

    fn render(
        &self,
        pieces: &[Piece],
        rule: &Rule,
        set: &str,
        n: u64,
        depth: usize,
        out: &mut String,
    ) -> Result<(), NumberError> {
        for piece in pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Quotient(target) => {
                    let target = target.as_deref().unwrap_or(set);
                    out.push_str(&self.format(target, n / rule.divisor, depth + 1)?);
                }
                Piece::Remainder(target) => {
                    let target = target.as_deref().unwrap_or(set);
                    out.push_str(&self.format(target, n % rule.divisor, depth + 1)?);
                }
                Piece::Whole(target) => {
                    if target == set {
                        return Err(NumberError::Rules(format!("rule in {set} formats itself")));
                    }
                    out.push_str(&self.format(target, n, depth + 1)?);
                }
                Piece::Optional(inner) => {
                    if n % rule.divisor != 0 {
                        self.render(inner, rule, set, n, depth, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}
