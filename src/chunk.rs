//! Sentence and clause segmentation.
//!
//! Text is first split into sentences, then each sentence into chunks at a
//! configurable set of delimiters.  A chunk keeps the delimiter that ended it
//! (or the sentence's own final punctuation) as its terminator, and the last
//! chunk of every sentence is flagged as the end of the sentence.

use once_cell::sync::Lazy;
use regex::Regex;

/// Delimiters used when none are configured.
pub const DEFAULT_DELIMITERS: &[&str] = &[", ", ":", ";", "...", "|"];

/// Characters that can end a sentence.
const SENTENCE_END: &[char] = &['.', '!', '?', '…', '。', '！', '？'];

/// Closing quotes and brackets that stay attached to the sentence they end.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '»', '”', '’'];

static DEFAULT_CHUNKER: Lazy<Chunker> = Lazy::new(|| Chunker::new(DEFAULT_DELIMITERS));

/// A delimiter-bounded span of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text, trimmed.
    pub text: String,
    /// Delimiter that followed the chunk, trimmed, or the sentence's default
    /// terminator for the last chunk.
    pub terminator: String,
    pub end_of_sentence: bool,
}

impl TextChunk {
    pub fn new(
        text: impl Into<String>,
        terminator: impl Into<String>,
        end_of_sentence: bool,
    ) -> Self {
        Self {
            text: text.into(),
            terminator: terminator.into(),
            end_of_sentence,
        }
    }

    /// The chunk produced for empty input.
    pub fn empty() -> Self {
        Self::new("", "", true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sentence tokenizer
// ─────────────────────────────────────────────────────────────────────────────

/// Split `text` into trimmed, non-empty sentences.
///
/// A sentence ends at a line break, or after a run of `.`, `!`, `?`, `…`
/// (plus closing quotes) that is followed by whitespace and then by
/// anything but a lowercase letter.  `3.5`, `e.g. this` and `"Hi!" she
/// said` therefore stay in one sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            push_trimmed(&mut sentences, &text[start..i]);
            start = i + 1;
            continue;
        }
        if !SENTENCE_END.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, d)) = chars.peek() {
            if SENTENCE_END.contains(&d) || CLOSERS.contains(&d) {
                end = j + d.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let rest = &text[end..];
        let next = rest.trim_start_matches(|ch: char| ch.is_whitespace() && ch != '\n');
        let followed_by_space = rest.len() > next.len();
        let continues_lowercase = next.chars().next().is_some_and(char::is_lowercase);
        if next.is_empty() || (followed_by_space && !continues_lowercase) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunker
// ─────────────────────────────────────────────────────────────────────────────

/// Compiled delimiter set.
#[derive(Debug, Clone)]
pub struct Chunker {
    delimiters: Vec<String>,
    pattern: Option<Regex>,
}

impl Default for Chunker {
    fn default() -> Self {
        DEFAULT_CHUNKER.clone()
    }
}

impl Chunker {
    /// Build a chunker; delimiters are matched in the order given, empty
    /// strings are ignored.
    pub fn new<S: AsRef<str>>(delimiters: &[S]) -> Self {
        let delimiters: Vec<String> = delimiters
            .iter()
            .map(|d| d.as_ref().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        let alternation = delimiters
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = if alternation.is_empty() {
            None
        } else {
            match Regex::new(&alternation) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::error!(
                        pattern = %alternation,
                        error = %e,
                        "invalid delimiter pattern"
                    );
                    None
                }
            }
        };
        Self {
            delimiters,
            pattern,
        }
    }

    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// Chunk `text`; empty or blank input yields one empty end-of-sentence
    /// chunk.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return vec![TextChunk::empty()];
        }
        sentences
            .into_iter()
            .flat_map(|sentence| self.chunk_sentence(sentence))
            .collect()
    }

    fn chunk_sentence(&self, sentence: &str) -> Vec<TextChunk> {
        let default_terminator = match sentence.chars().last() {
            Some(c) if c.is_ascii_punctuation() => c.to_string(),
            _ => ".".to_string(),
        };

        let parts = self.split_keep(sentence);
        let mut chunks = Vec::with_capacity(parts.len() / 2 + 1);
        for i in (0..parts.len()).step_by(2) {
            let terminator = parts.get(i + 1).copied().unwrap_or(&default_terminator);
            chunks.push(TextChunk::new(
                parts[i].trim(),
                terminator.trim(),
                i + 2 >= parts.len(),
            ));
        }
        chunks
    }

    /// Split on delimiters, keeping each delimiter as its own element:
    /// `[text, delim, text, delim, ..., text]`.
    fn split_keep<'a>(&self, s: &'a str) -> Vec<&'a str> {
        let Some(re) = &self.pattern else {
            return vec![s];
        };
        let mut parts = Vec::new();
        let mut last = 0;
        for m in re.find_iter(s) {
            parts.push(&s[last..m.start()]);
            parts.push(m.as_str());
            last = m.end();
        }
        parts.push(&s[last..]);
        parts
    }
}

/// Chunk `text` with the given delimiters, or [`DEFAULT_DELIMITERS`].
pub fn chunk_text(text: &str, delimiters: Option<&[&str]>) -> Vec<TextChunk> {
    match delimiters {
        Some(d) if !d.is_empty() => Chunker::new(d).chunk(text),
        _ => DEFAULT_CHUNKER.chunk(text),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_sentences() {
        let s = split_sentences("Hello there. How are you? Fine!");
        assert_eq!(s, vec!["Hello there.", "How are you?", "Fine!"]);
    }

    #[test]
    fn test_split_sentences_keeps_decimals_and_lowercase() {
        assert_eq!(split_sentences("It costs 3.5 euros."), vec!["It costs 3.5 euros."]);
        assert_eq!(split_sentences("See e.g. this one."), vec!["See e.g. this one."]);
        assert_eq!(
            split_sentences("\"Stop!\" He ran. Done"),
            vec!["\"Stop!\"", "He ran.", "Done"]
        );
    }

    #[test]
    fn test_split_sentences_newlines() {
        assert_eq!(split_sentences("one\ntwo\n\nthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(chunk_text("", None), vec![TextChunk::empty()]);
        assert_eq!(chunk_text("   ", None), vec![TextChunk::empty()]);
    }

    #[test]
    fn test_single_sentence_chunks() {
        let chunks = chunk_text("Hello, world: how are you?", None);
        assert_eq!(
            chunks,
            vec![
                TextChunk::new("Hello", ",", false),
                TextChunk::new("world", ":", false),
                TextChunk::new("how are you?", "?", true),
            ]
        );
    }

    #[test]
    fn test_default_terminator() {
        let chunks = chunk_text("no punctuation here", None);
        assert_eq!(chunks, vec![TextChunk::new("no punctuation here", ".", true)]);
    }

    #[test]
    fn test_trailing_delimiter() {
        let chunks = chunk_text("a; b;", None);
        assert_eq!(
            chunks,
            vec![
                TextChunk::new("a", ";", false),
                TextChunk::new("b", ";", false),
                TextChunk::new("", ";", true),
            ]
        );
    }

    #[test]
    fn test_multiple_sentences() {
        let chunks = chunk_text("First, part. Second part!", None);
        assert_eq!(
            chunks,
            vec![
                TextChunk::new("First", ",", false),
                TextChunk::new("part.", ".", true),
                TextChunk::new("Second part!", "!", true),
            ]
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let chunks = chunk_text("a-b", Some(&["-"]));
        assert_eq!(
            chunks,
            vec![TextChunk::new("a", "-", false), TextChunk::new("b", ".", true)]
        );
        // Comma without a following space is not a default delimiter.
        let chunks = chunk_text("1,5 apples", None);
        assert_eq!(chunks.len(), 1, "got: {:?}", chunks);
    }

    #[test]
    fn test_ellipsis_delimiter() {
        let chunks = chunk_text("wait... what", None);
        assert_eq!(
            chunks,
            vec![TextChunk::new("wait", "...", false), TextChunk::new("what", ".", true)]
        );
    }

    fn strip_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    proptest! {
        #[test]
        fn prop_chunks_reconstruct_input(text in "[a-zA-Z ,.;:!?|]{1,80}") {
            let chunks = chunk_text(&text, None);
            let rebuilt: String = chunks
                .iter()
                .map(|c| if c.end_of_sentence {
                    c.text.clone()
                } else {
                    format!("{}{}", c.text, c.terminator)
                })
                .collect();
            prop_assert_eq!(strip_ws(&rebuilt), strip_ws(&text));
        }

        #[test]
        fn prop_every_sentence_ends_once(text in "[a-z ,.!?]{0,60}") {
            let chunks = chunk_text(&text, None);
            prop_assert!(!chunks.is_empty());
            prop_assert!(chunks.last().is_some_and(|c| c.end_of_sentence));
        }
    }
}
