//! Grapheme-to-phoneme backends.
//!
//! Two backends implement the [`Phonemizer`] trait:
//!
//! * [`CodepointPhonemizer`]: every Unicode codepoint of the (normalised)
//!   text is a phoneme.  Pure Rust, always available.
//! * [`EspeakPhonemizer`]: runs the `espeak-ng` executable and reads IPA
//!   from its standard output.
//!
//! Both share the chunk → phonemize → group pipeline of
//! [`Phonemizer::phonemize`].  [`Backend`] is the closed set of the two,
//! chosen at run time from [`FrontendConfig`].

use std::io::{ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::chunk::Chunker;
use crate::config::{FrontendConfig, PhonemeType};
use crate::error::{LangError, PhonemizerError};
use crate::lang::match_lang;

/// Phonemes of one sentence, one codepoint per entry.
pub type PhonemeSentence = Vec<String>;

/// Language-switch flags such as `(en)` emitted around foreign words.
static RE_LANG_SWITCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]+\)").unwrap());

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Unicode normalisation form applied by the codepoint backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnicodeForm {
    #[serde(rename = "NFC")]
    Nfc,
    #[default]
    #[serde(rename = "NFD")]
    Nfd,
    #[serde(rename = "NFKC")]
    Nfkc,
    #[serde(rename = "NFKD")]
    Nfkd,
}

impl UnicodeForm {
    pub fn apply(self, text: &str) -> String {
        match self {
            UnicodeForm::Nfc => text.nfc().collect(),
            UnicodeForm::Nfd => text.nfd().collect(),
            UnicodeForm::Nfkc => text.nfkc().collect(),
            UnicodeForm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Casing applied to text before codepoint phonemisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCasing {
    #[default]
    Ignore,
    Lower,
    Upper,
    /// Caseless matching form: lowercase plus the few full foldings that
    /// lowercasing misses (`ß` → `ss`, final sigma).
    Fold,
}

impl TextCasing {
    pub fn apply(self, text: &str) -> String {
        match self {
            TextCasing::Ignore => text.to_string(),
            TextCasing::Lower => text.to_lowercase(),
            TextCasing::Upper => text.to_uppercase(),
            TextCasing::Fold => text
                .to_lowercase()
                .chars()
                .flat_map(|c| match c {
                    'ß' | 'ẞ' => vec!['s', 's'],
                    'ς' => vec!['σ'],
                    c => vec![c],
                })
                .collect(),
        }
    }
}

/// How chunk results are grouped into sentences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceGrouping {
    /// Every chunk becomes its own sentence.
    #[default]
    Chunk,
    /// Chunks are merged until the chunker reports an end of sentence.
    Sentence,
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Phonemes for one chunk before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPhonemes {
    pub phonemes: String,
    pub terminator: String,
    pub end_of_sentence: bool,
}

/// Remove ASCII punctuation and trim.
pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Strip language-switch flags and group phonemes into sentences.
///
/// A sentence is flushed after every entry flagged as end of sentence; a
/// non-empty remainder becomes a final sentence.
pub fn process_phones(raw: &[RawPhonemes]) -> Vec<PhonemeSentence> {
    let mut sentences = Vec::new();
    let mut current: PhonemeSentence = Vec::new();
    for entry in raw {
        let stripped = RE_LANG_SWITCH.replace_all(&entry.phonemes, "");
        current.extend(stripped.chars().map(String::from));
        if entry.end_of_sentence {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }
    sentences
}

/// A grapheme-to-phoneme converter.
pub trait Phonemizer {
    /// Phonemes of `text` in language `lang` as one string.
    fn phonemize_string(&self, text: &str, lang: &str) -> Result<String, PhonemizerError>;

    /// Phonemes of `text`, one codepoint per entry.
    fn phonemize_to_list(&self, text: &str, lang: &str) -> Result<Vec<String>, PhonemizerError> {
        Ok(self
            .phonemize_string(text, lang)?
            .chars()
            .map(String::from)
            .collect())
    }

    /// Phonemes of `text` grouped by sentence, using the default chunker.
    fn phonemize(&self, text: &str, lang: &str) -> Result<Vec<PhonemeSentence>, PhonemizerError> {
        self.phonemize_chunks(text, lang, &Chunker::default(), SentenceGrouping::Chunk)
    }

    /// Chunk `text`, phonemize each punctuation-free chunk and group the
    /// results.  Empty text yields a single empty sentence.
    fn phonemize_chunks(
        &self,
        text: &str,
        lang: &str,
        chunker: &Chunker,
        grouping: SentenceGrouping,
    ) -> Result<Vec<PhonemeSentence>, PhonemizerError> {
        if text.is_empty() {
            return Ok(vec![Vec::new()]);
        }
        let mut raw = Vec::new();
        for chunk in chunker.chunk(text) {
            let phonemes = self.phonemize_string(&remove_punctuation(&chunk.text), lang)?;
            raw.push(RawPhonemes {
                phonemes,
                terminator: chunk.terminator,
                end_of_sentence: match grouping {
                    SentenceGrouping::Chunk => true,
                    SentenceGrouping::Sentence => chunk.end_of_sentence,
                },
            });
        }
        Ok(process_phones(&raw))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Codepoints
// ─────────────────────────────────────────────────────────────────────────────

/// Phonemes are codepoints.  NFD (the default) splits accents into their
/// own combining codepoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodepointPhonemizer {
    pub form: UnicodeForm,
    pub casing: TextCasing,
}

impl CodepointPhonemizer {
    pub fn new(form: UnicodeForm, casing: TextCasing) -> Self {
        Self { form, casing }
    }
}

impl Phonemizer for CodepointPhonemizer {
    fn phonemize_string(&self, text: &str, _lang: &str) -> Result<String, PhonemizerError> {
        Ok(self.form.apply(&self.casing.apply(text)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// espeak-ng
// ─────────────────────────────────────────────────────────────────────────────

/// Voices known to `espeak-ng`.
pub const ESPEAK_LANGS: &[&str] = &[
    "es-419", "ca", "qya", "ga", "et", "ky", "io", "fa-latn", "en-gb", "fo", "haw", "kl", "ta",
    "ml", "gd", "sd", "es", "hy", "ur", "ro", "hi", "or", "ti", "ca-va", "om", "tr", "pa", "smj",
    "mk", "bg", "cv", "fr", "fi", "en-gb-x-rp", "ru", "mt", "an", "mr", "pap", "vi", "id", "fr-be",
    "ltg", "my", "nl", "shn", "ba", "az", "cmn", "da", "as", "sw", "piqd", "en-us", "hr", "it",
    "ug", "th", "mi", "cy", "ru-lv", "ia", "tt", "hu", "xex", "te", "ne", "eu", "ja", "bpy", "hak",
    "cs", "en-gb-scotland", "hyw", "uk", "pt", "bn", "mto", "yue", "be", "gu", "sv", "sl",
    "cmn-latn-pinyin", "lfn", "lv", "fa", "sjn", "nog", "ms", "vi-vn-x-central", "lt", "kn", "he",
    "qu", "ca-ba", "quc", "nb", "sk", "tn", "py", "si", "de", "ar", "en-gb-x-gbcwmd", "bs", "qdb",
    "sq", "sr", "tk", "en-029", "ht", "ru-cl", "af", "pt-br", "fr-ch", "ka", "en-gb-x-gbclan", "ko",
    "is", "ca-nw", "gn", "kok", "la", "lb", "am", "kk", "ku", "kaa", "jbo", "eo", "uz", "nci",
    "vi-vn-x-south", "el", "pl", "grc",
];

pub const DEFAULT_ESPEAK_BINARY: &str = "espeak-ng";
pub const DEFAULT_ESPEAK_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Runs the `espeak-ng` executable, one process per chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EspeakPhonemizer {
    binary: String,
    timeout: Option<Duration>,
}

impl Default for EspeakPhonemizer {
    fn default() -> Self {
        Self {
            binary: DEFAULT_ESPEAK_BINARY.to_string(),
            timeout: Some(DEFAULT_ESPEAK_TIMEOUT),
        }
    }
}

impl EspeakPhonemizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable name or path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Wall-clock bound for one invocation; `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The espeak-ng voice to use for `target`.
    ///
    /// `en-gb` maps to Received Pronunciation; otherwise an exact entry of
    /// [`ESPEAK_LANGS`], then the bare primary subtag, then the closest
    /// entry by locale distance.
    pub fn get_lang(target: &str) -> Result<String, LangError> {
        let lower = target.to_lowercase().replace('_', "-");
        if lower == "en-gb" {
            return Ok("en-gb-x-rp".to_string());
        }
        if let Some(lang) = ESPEAK_LANGS.iter().find(|l| **l == lower) {
            return Ok((*lang).to_string());
        }
        let primary = lower.split('-').next().unwrap_or_default();
        if ESPEAK_LANGS.contains(&primary) {
            return Ok(primary.to_string());
        }
        match_lang(target, ESPEAK_LANGS)
    }

    /// Whether the executable can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    /// Run the executable with `args`, feeding `input` on stdin; returns
    /// trimmed stdout decoded lossily.
    pub fn run(&self, args: &[&str], input: &str) -> Result<String, PhonemizerError> {
        tracing::debug!(binary = %self.binary, ?args, "running espeak-ng");
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PhonemizerError::NotInstalled {
                    binary: self.binary.clone(),
                },
                _ => self.io_error(e),
            })?;

        let stdin = child.stdin.take();
        let input = input.to_owned();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = self.wait(&mut child)?;

        match writer.join() {
            Ok(Err(e)) if e.kind() != ErrorKind::BrokenPipe => return Err(self.io_error(e)),
            _ => {}
        }
        let stdout = String::from_utf8_lossy(&stdout.join().unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).into_owned();

        if !status.success() {
            return Err(PhonemizerError::Failed {
                binary: self.binary.clone(),
                code: status.code(),
                stdout,
                stderr,
            });
        }
        Ok(stdout.trim().to_string())
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, PhonemizerError> {
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(|e| self.io_error(e));
        };
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(binary = %self.binary, ?timeout, "espeak-ng timed out, killed");
                    return Err(PhonemizerError::Timeout {
                        binary: self.binary.clone(),
                        timeout_ms: timeout.as_millis() as u64,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.io_error(e)),
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> PhonemizerError {
        PhonemizerError::Io {
            binary: self.binary.clone(),
            source,
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

impl Phonemizer for EspeakPhonemizer {
    fn phonemize_string(&self, text: &str, lang: &str) -> Result<String, PhonemizerError> {
        let voice = Self::get_lang(lang)?;
        self.run(&["-q", "-x", "--ipa", "-v", &voice], text)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend selection
// ─────────────────────────────────────────────────────────────────────────────

/// The phonemizer chosen by configuration, with its chunking settings.
#[derive(Debug, Clone)]
pub struct Backend {
    kind: BackendKind,
    chunker: Chunker,
    grouping: SentenceGrouping,
}

#[derive(Debug, Clone)]
pub enum BackendKind {
    Codepoint(CodepointPhonemizer),
    Espeak(EspeakPhonemizer),
}

impl Backend {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            chunker: Chunker::default(),
            grouping: SentenceGrouping::default(),
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        let kind = match config.phoneme_type {
            PhonemeType::Text => {
                BackendKind::Codepoint(CodepointPhonemizer::new(config.unicode_form, config.casing))
            }
            PhonemeType::Espeak => BackendKind::Espeak(
                EspeakPhonemizer::new()
                    .with_binary(config.espeak_binary.clone())
                    .with_timeout(config.espeak_timeout()),
            ),
        };
        Self {
            kind,
            chunker: Chunker::new(config.delimiters.as_slice()),
            grouping: config.sentence_grouping,
        }
    }

    pub fn kind(&self) -> &BackendKind {
        &self.kind
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    pub fn grouping(&self) -> SentenceGrouping {
        self.grouping
    }
}

impl Phonemizer for Backend {
    fn phonemize_string(&self, text: &str, lang: &str) -> Result<String, PhonemizerError> {
        match &self.kind {
            BackendKind::Codepoint(p) => p.phonemize_string(text, lang),
            BackendKind::Espeak(p) => p.phonemize_string(text, lang),
        }
    }

    fn phonemize(&self, text: &str, lang: &str) -> Result<Vec<PhonemeSentence>, PhonemizerError> {
        self.phonemize_chunks(text, lang, &self.chunker, self.grouping)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<String> {
        s.chars().map(String::from).collect()
    }

    fn raw(phonemes: &str, eos: bool) -> RawPhonemes {
        RawPhonemes {
            phonemes: phonemes.to_string(),
            terminator: ".".to_string(),
            end_of_sentence: eos,
        }
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("Hello, world!"), "Hello world");
        assert_eq!(remove_punctuation("  ...  "), "");
        assert_eq!(remove_punctuation("¿Qué?"), "¿Qué");
    }

    #[test]
    fn test_process_phones_strips_lang_switch() {
        let out = process_phones(&[raw("a(fr)b", true)]);
        assert_eq!(out, vec![chars("ab")]);
    }

    #[test]
    fn test_process_phones_grouping() {
        let out = process_phones(&[raw("ab", false), raw("c", true), raw("d", false)]);
        assert_eq!(out, vec![chars("abc"), chars("d")]);
        assert!(process_phones(&[]).is_empty());
    }

    #[test]
    fn test_codepoint_nfd_splits_accents() {
        let p = CodepointPhonemizer::default();
        let s = p.phonemize_string("é", "pt").unwrap();
        assert_eq!(s.chars().count(), 2, "got: {:?}", s);
        let nfc = CodepointPhonemizer::new(UnicodeForm::Nfc, TextCasing::Ignore);
        assert_eq!(nfc.phonemize_string("e\u{301}", "pt").unwrap(), "é");
    }

    #[test]
    fn test_text_casing() {
        assert_eq!(TextCasing::Lower.apply("ABC"), "abc");
        assert_eq!(TextCasing::Upper.apply("abc"), "ABC");
        assert_eq!(TextCasing::Fold.apply("Straße"), "strasse");
        assert_eq!(TextCasing::Ignore.apply("AbC"), "AbC");
    }

    #[test]
    fn test_phonemize_empty() {
        let p = CodepointPhonemizer::default();
        assert_eq!(p.phonemize("", "en").unwrap(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_phonemize_chunks_each_become_sentences() {
        let p = CodepointPhonemizer::default();
        let out = p.phonemize("ab, cd.", "en").unwrap();
        assert_eq!(out, vec![chars("ab"), chars("cd")]);
    }

    #[test]
    fn test_phonemize_sentence_grouping() {
        let p = CodepointPhonemizer::default();
        let out = p
            .phonemize_chunks("ab, cd. Ef", "en", &Chunker::default(), SentenceGrouping::Sentence)
            .unwrap();
        assert_eq!(out, vec![chars("abcd"), chars("Ef")]);
    }

    #[test]
    fn test_phonemize_to_list() {
        let p = CodepointPhonemizer::default();
        assert_eq!(p.phonemize_to_list("hi", "en").unwrap(), chars("hi"));
    }

    #[test]
    fn test_get_lang() {
        assert_eq!(EspeakPhonemizer::get_lang("en-GB").unwrap(), "en-gb-x-rp");
        assert_eq!(EspeakPhonemizer::get_lang("en-us").unwrap(), "en-us");
        assert_eq!(EspeakPhonemizer::get_lang("pt-BR").unwrap(), "pt-br");
        assert_eq!(EspeakPhonemizer::get_lang("pt_BR").unwrap(), "pt-br");
        assert_eq!(EspeakPhonemizer::get_lang("en_GB").unwrap(), "en-gb-x-rp");
        assert_eq!(EspeakPhonemizer::get_lang("pt-PT").unwrap(), "pt");
        assert_eq!(EspeakPhonemizer::get_lang("de-AT").unwrap(), "de");
        assert_eq!(EspeakPhonemizer::get_lang("zh-CN").unwrap(), "cmn");
        assert_eq!(EspeakPhonemizer::get_lang("no").unwrap(), "nb");
    }

    #[test]
    fn test_get_lang_unsupported() {
        let err = EspeakPhonemizer::get_lang("xx-ZZ").unwrap_err();
        assert_eq!(err, LangError::UnsupportedLanguage("xx-ZZ".to_string()));
        let err = EspeakPhonemizer::new().phonemize_string("hi", "xx-ZZ").unwrap_err();
        assert!(matches!(err, PhonemizerError::UnsupportedLanguage(_)), "got: {}", err);
    }

    #[test]
    fn test_missing_binary() {
        let p = EspeakPhonemizer::new().with_binary("definitely-not-espeak-ng-binary");
        assert!(!p.is_available());
        let err = p.phonemize_string("hello", "en-us").unwrap_err();
        assert!(matches!(err, PhonemizerError::NotInstalled { .. }), "got: {}", err);
        assert!(err.to_string().contains("not found"), "got: {}", err);
    }

    /// An executable shell script standing in for espeak-ng.
    #[cfg(unix)]
    fn fake_espeak(dir: &std::path::Path, body: &str) -> EspeakPhonemizer {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("espeak-ng");
        std::fs::write(&path, format!("#!/bin/sh\ncat >/dev/null\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        EspeakPhonemizer::new().with_binary(path.to_string_lossy())
    }

    #[cfg(unix)]
    #[test]
    fn test_espeak_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let p = fake_espeak(dir.path(), "echo partial\necho 'bad voice' >&2\nexit 3");
        let err = p.phonemize_string("hello", "en-us").unwrap_err();
        match &err {
            PhonemizerError::Failed {
                code,
                stdout,
                stderr,
                ..
            } => {
                assert_eq!(*code, Some(3));
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "bad voice\n");
            }
            other => panic!("expected Failed, got: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_espeak_timeout_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let p = fake_espeak(dir.path(), "exec sleep 5")
            .with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        let err = p.phonemize_string("hello", "en-us").unwrap_err();
        assert!(
            matches!(err, PhonemizerError::Timeout { timeout_ms: 200, .. }),
            "got: {}",
            err
        );
        assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
    }

    #[cfg(unix)]
    #[test]
    fn test_espeak_invalid_utf8_is_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let p = fake_espeak(dir.path(), r"printf 'h\377llo(en)x\n'");
        let out = p.phonemize_string("hello", "en-us").unwrap();
        assert!(out.starts_with('h'), "got: {:?}", out);
        assert!(out.contains('\u{fffd}'), "got: {:?}", out);
        assert!(out.ends_with("llo(en)x"), "got: {:?}", out);

        let sentences = p.phonemize("hello", "en-us").unwrap();
        let joined: String = sentences.concat().concat();
        assert!(!joined.contains("(en)"), "got: {:?}", joined);
        assert!(joined.contains('\u{fffd}') && joined.ends_with("llox"), "got: {:?}", joined);
    }

    #[test]
    fn test_espeak_hello() {
        let p = EspeakPhonemizer::new();
        if !p.is_available() {
            eprintln!("espeak-ng not installed, skipping");
            return;
        }
        let out = p.phonemize("Hello world. How are you?", "en-us").unwrap();
        assert_eq!(out.len(), 2, "got: {:?}", out);
        assert!(out.iter().all(|s| !s.is_empty()), "got: {:?}", out);
        assert!(out.iter().flatten().all(|p| !p.contains('(')), "got: {:?}", out);
    }

    #[test]
    fn test_backend_from_config() {
        let config = FrontendConfig {
            phoneme_type: PhonemeType::Text,
            ..FrontendConfig::default()
        };
        let backend = Backend::from_config(&config);
        assert!(matches!(backend.kind(), BackendKind::Codepoint(_)));
        assert_eq!(backend.phonemize("a|b", "en").unwrap(), vec![chars("a"), chars("b")]);

        let backend = Backend::from_config(&FrontendConfig::default());
        match backend.kind() {
            BackendKind::Espeak(p) => {
                assert_eq!(p.binary(), DEFAULT_ESPEAK_BINARY);
                assert_eq!(p.timeout(), Some(DEFAULT_ESPEAK_TIMEOUT));
            }
            other => panic!("expected espeak backend, got: {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_codepoint_deterministic(text in "\\PC{0,40}") {
            let p = CodepointPhonemizer::default();
            let a = p.phonemize(&text, "en").unwrap();
            let b = p.phonemize(&text, "en").unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
