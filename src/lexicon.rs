//! Locale-keyed lexicon tables: contractions, titles and unit symbols.
//!
//! Tables are keyed by the lowercase primary subtag of a [`LocaleTag`] and
//! built once on first use.  Lookups are exact (case-sensitive) except for
//! units, which also fall back to a case-insensitive match because the unit
//! patterns in the normaliser are case-insensitive.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::lang::LocaleTag;

type Table = &'static [(&'static str, &'static str)];

// ─────────────────────────────────────────────────────────────────────────────
// Raw data
// ─────────────────────────────────────────────────────────────────────────────

const CONTRACTIONS_EN: Table = &[
    ("I'd", "I would"),
    ("I'll", "I will"),
    ("I'm", "I am"),
    ("I've", "I have"),
    ("ain't", "is not"),
    ("aren't", "are not"),
    ("can't", "can not"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("might've", "might have"),
    ("mightn't", "might not"),
    ("must've", "must have"),
    ("mustn't", "must not"),
    ("needn't", "need not"),
    ("oughtn't", "ought not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("somebody's", "somebody is"),
    ("someone'd", "someone would"),
    ("someone'll", "someone will"),
    ("someone's", "someone is"),
    ("that'd", "that would"),
    ("that'll", "that will"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there're", "there are"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'd", "what did"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("whats", "what is"),
    ("when'd", "when did"),
    ("when's", "when is"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("where've", "where have"),
    ("who'd", "who would"),
    ("who'd've", "who would have"),
    ("who'll", "who will"),
    ("who're", "who are"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why'd", "why did"),
    ("why're", "why are"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("won't've", "will not have"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("wouldn't've", "would not have"),
    ("y'ain't", "you are not"),
    ("y'aint", "you are not"),
    ("y'all", "you all"),
    ("ya'll", "you all"),
    ("you'd", "you would"),
    ("you'd've", "you would have"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("I'm'a", "I am going to"),
    ("I'm'o", "I am going to"),
    ("I'll've", "I will have"),
    ("I'd've", "I would have"),
    ("Whatcha", "What are you"),
    ("amn't", "am not"),
    ("'cause", "because"),
    ("can't've", "cannot have"),
    ("couldn't've", "could not have"),
    ("daren't", "dare not"),
    ("daresn't", "dare not"),
    ("dasn't", "dare not"),
    ("everyone's", "everyone is"),
    ("gimme", "give me"),
    ("gon't", "go not"),
    ("hadn't've", "had not have"),
    ("he've", "he would have"),
    ("he'll've", "he will have"),
    ("he'd've", "he would have"),
    ("here's", "here is"),
    ("how're", "how are"),
    ("how'd'y", "how do you do"),
    ("howd'y", "how do you do"),
    ("howdy", "how do you do"),
    ("'tis", "it is"),
    ("'twas", "it was"),
    ("it'll've", "it will have"),
    ("it'd've", "it would have"),
    ("kinda", "kind of"),
    ("let's", "let us"),
    ("ma'am", "madam"),
    ("may've", "may have"),
    ("mayn't", "may not"),
    ("mightn't've", "might not have"),
    ("mustn't've", "must not have"),
    ("needn't've", "need not have"),
    ("ol'", "old"),
    ("oughtn't've", "ought not have"),
    ("sha'n't", "shall not"),
    ("shalln't", "shall not"),
    ("shan't've", "shall not have"),
    ("she'd've", "she would have"),
    ("shouldn't've", "should not have"),
    ("so've", "so have"),
    ("so's", "so is"),
    ("something's", "something is"),
    ("that're", "that are"),
    ("that'd've", "that would have"),
    ("there'll", "there will"),
    ("there'd've", "there would have"),
    ("these're", "these are"),
    ("they'll've", "they will have"),
    ("they'd've", "they would have"),
    ("this's", "this is"),
    ("this'll", "this will"),
    ("this'd", "this would"),
    ("those're", "those are"),
    ("to've", "to have"),
    ("wanna", "want to"),
    ("we'll've", "we will have"),
    ("we'd've", "we would have"),
    ("what'll've", "what will have"),
    ("when've", "when have"),
    ("where're", "where are"),
    ("which's", "which is"),
    ("who'll've", "who will have"),
    ("why've", "why have"),
    ("will've", "will have"),
    ("y'all're", "you all are"),
    ("y'all've", "you all have"),
    ("y'all'd", "you all would"),
    ("y'all'd've", "you all would have"),
    ("you'll've", "you will have"),
];

const TITLES_EN: Table = &[("Dr.", "Doctor"), ("Mr.", "Mister"), ("Prof.", "Professor")];

const TITLES_CA: Table = &[
    ("Dr.", "Doctor"),
    ("Sr.", "Senyor"),
    ("Sra.", "Senyora"),
    ("Prof.", "Professor"),
];

const TITLES_ES: Table = &[
    ("Dr.", "Doctor"),
    ("Sr.", "Señor"),
    ("Sra.", "Señora"),
    ("Prof.", "Profesor"),
    ("D.", "Don"),
    ("Dña.", "Doña"),
];

const TITLES_PT: Table = &[
    ("Dr.", "Doutor"),
    ("Sr.", "Senhor"),
    ("Sra.", "Senhora"),
    ("Prof.", "Professor"),
    ("Drª.", "Doutora"),
    ("Eng.", "Engenheiro"),
    ("D.", "Dom"),
    ("Dª", "Dona"),
];

const TITLES_GL: Table = &[
    ("Dr.", "Doutor"),
    ("Sr.", "Señor"),
    ("Sra.", "Señora"),
    ("Prof.", "Profesor"),
    ("Srta.", "Señorita"),
];

const TITLES_FR: Table = &[
    ("Dr.", "Docteur"),
    ("M.", "Monsieur"),
    ("Mme", "Madame"),
    ("Mlle", "Mademoiselle"),
    ("Prof.", "Professeur"),
    ("Pr.", "Professeur"),
];

const TITLES_IT: Table = &[
    ("Dr.", "Dottore"),
    ("Sig.", "Signore"),
    ("Sig.ra", "Signora"),
    ("Prof.", "Professore"),
    ("Dott.ssa", "Dottoressa"),
    ("Sig.na", "Signorina"),
];

const TITLES_NL: Table = &[
    ("Dr.", "Dokter"),
    ("Dhr.", "De Heer"),
    ("Mevr.", "Mevrouw"),
    ("Prof.", "Professor"),
    ("Drs.", "Dokterandus"),
    ("Ing.", "Ingenieur"),
];

const TITLES_DE: Table = &[("Dr.", "Doktor"), ("Prof.", "Professor")];

const UNITS_EN: Table = &[
    ("€", "euros"),
    ("%", "per cent"),
    ("°C", "degrees celsius"),
    ("°F", "degrees fahrenheit"),
    ("°K", "degrees kelvin"),
    ("°", "degrees"),
    ("$", "dollars"),
    ("£", "pounds"),
    ("km", "kilometers"),
    ("m", "meters"),
    ("cm", "centimeters"),
    ("mm", "millimeters"),
    ("ft", "feet"),
    ("in", "inches"),
    ("yd", "yards"),
    ("mi", "miles"),
    ("kg", "kilograms"),
    ("g", "grams"),
    ("lb", "pounds"),
    ("oz", "ounces"),
    ("L", "liters"),
    ("mL", "milliliters"),
    ("gal", "gallons"),
    ("qt", "quarts"),
    ("pt", "pints"),
    ("hr", "hours"),
    ("min", "minutes"),
    ("s", "seconds"),
];

const UNITS_PT: Table = &[
    ("€", "euros"),
    ("%", "por cento"),
    ("°C", "graus celsius"),
    ("°F", "graus fahrenheit"),
    ("°K", "graus kelvin"),
    ("°", "graus"),
    ("$", "dólares"),
    ("£", "libras"),
    ("km", "quilômetros"),
    ("m", "metros"),
    ("cm", "centímetros"),
    ("mm", "milímetros"),
    ("kg", "quilogramas"),
    ("g", "gramas"),
    ("L", "litros"),
    ("mL", "mililitros"),
    ("h", "horas"),
    ("min", "minutos"),
    ("s", "segundos"),
];

const UNITS_ES: Table = &[
    ("€", "euros"),
    ("%", "por ciento"),
    ("°C", "grados celsius"),
    ("°F", "grados fahrenheit"),
    ("°K", "grados kelvin"),
    ("°", "grados"),
    ("$", "dólares"),
    ("£", "libras"),
    ("km", "kilómetros"),
    ("m", "metros"),
    ("cm", "centímetros"),
    ("kg", "kilogramos"),
    ("g", "gramos"),
    ("L", "litros"),
    ("mL", "mililitros"),
];

const UNITS_FR: Table = &[
    ("€", "euros"),
    ("%", "pour cent"),
    ("°C", "degrés celsius"),
    ("°F", "degrés fahrenheit"),
    ("°K", "degrés kelvin"),
    ("°", "degrés"),
    ("$", "dollars"),
    ("£", "livres"),
    ("km", "kilomètres"),
    ("m", "mètres"),
    ("cm", "centimètres"),
    ("kg", "kilogrammes"),
    ("g", "grammes"),
    ("L", "litres"),
    ("mL", "millilitres"),
];

const UNITS_DE: Table = &[
    ("€", "Euro"),
    ("%", "Prozent"),
    ("°C", "Grad Celsius"),
    ("°F", "Grad Fahrenheit"),
    ("°K", "Grad Kelvin"),
    ("°", "Grad"),
    ("$", "Dollar"),
    ("£", "Pfund"),
    ("km", "Kilometer"),
    ("m", "Meter"),
    ("cm", "Zentimeter"),
    ("kg", "Kilogramm"),
    ("g", "Gramm"),
    ("L", "Liter"),
    ("mL", "Milliliter"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Indexed tables
// ─────────────────────────────────────────────────────────────────────────────

type Index = HashMap<&'static str, HashMap<&'static str, &'static str>>;

fn index(tables: &[(&'static str, Table)]) -> Index {
    tables
        .iter()
        .map(|(lang, table)| (*lang, table.iter().copied().collect()))
        .collect()
}

static CONTRACTIONS: Lazy<Index> = Lazy::new(|| index(&[("en", CONTRACTIONS_EN)]));

static TITLES: Lazy<Index> = Lazy::new(|| {
    index(&[
        ("en", TITLES_EN),
        ("ca", TITLES_CA),
        ("es", TITLES_ES),
        ("pt", TITLES_PT),
        ("gl", TITLES_GL),
        ("fr", TITLES_FR),
        ("it", TITLES_IT),
        ("nl", TITLES_NL),
        ("de", TITLES_DE),
    ])
});

static UNITS: Lazy<Index> = Lazy::new(|| {
    index(&[
        ("en", UNITS_EN),
        ("pt", UNITS_PT),
        ("es", UNITS_ES),
        ("fr", UNITS_FR),
        ("de", UNITS_DE),
    ])
});

/// Expansion of a contraction such as `"I'm"`, exact match only.
pub fn contraction(lang: &LocaleTag, word: &str) -> Option<&'static str> {
    CONTRACTIONS.get(lang.primary())?.get(word).copied()
}

/// Expansion of a title abbreviation such as `"Dr."`, exact match only.
pub fn title(lang: &LocaleTag, word: &str) -> Option<&'static str> {
    TITLES.get(lang.primary())?.get(word).copied()
}

/// All `(symbol, spoken word)` unit pairs for a language, if it has a table.
pub fn units(lang: &LocaleTag) -> Option<&'static HashMap<&'static str, &'static str>> {
    UNITS.get(lang.primary())
}

/// Spoken word for a unit symbol; prefers an exact match, then ignores case.
pub fn unit_word(lang: &LocaleTag, symbol: &str) -> Option<&'static str> {
    let table = units(lang)?;
    table.get(symbol).copied().or_else(|| {
        let mut matches: Vec<(&&str, &&str)> = table
            .iter()
            .filter(|(k, _)| k.to_lowercase() == symbol.to_lowercase())
            .collect();
        matches.sort();
        matches.first().map(|(_, v)| **v)
    })
}

/// The language's contraction table, for iteration.
pub fn contraction_table(lang: &LocaleTag) -> Option<&'static HashMap<&'static str, &'static str>> {
    CONTRACTIONS.get(lang.primary())
}

/// The language's title table, for iteration.
pub fn title_table(lang: &LocaleTag) -> Option<&'static HashMap<&'static str, &'static str>> {
    TITLES.get(lang.primary())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
