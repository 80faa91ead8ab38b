//! Error types shared across the crate.
//!
//! Normalisation never fails: per-token problems are logged and the original
//! text is kept.  The errors here cover the cases that must reach the caller:
//! locales nobody can speak, a missing or broken G2P executable, malformed
//! voice strings and acoustic-engine failures.

use thiserror::Error;

/// Locale tag parsing and matching errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangError {
    /// No candidate locale lies within the distance threshold.
    #[error("unsupported language code: {0}")]
    UnsupportedLanguage(String),

    /// The tag is not a well-formed language tag.
    #[error("malformed language tag: {0:?}")]
    InvalidTag(String),
}

/// Errors raised while spelling a number.  Callers in the normaliser catch
/// these and keep the original token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("no number speller for language {0:?}")]
    UnsupportedLanguage(String),

    #[error("not a plain decimal number: {0:?}")]
    Malformed(String),

    #[error("number too large to spell: {0}")]
    TooLarge(String),

    #[error("fraction with zero denominator: {0}")]
    ZeroDenominator(String),

    #[error("number rule set error: {0}")]
    Rules(String),
}

/// Errors raised while converting text to phonemes.
#[derive(Debug, Error)]
pub enum PhonemizerError {
    /// The G2P executable could not be found.
    #[error("{binary} command not found. Please ensure it is installed and available in your PATH")]
    NotInstalled { binary: String },

    /// The G2P executable ran but exited unsuccessfully.
    #[error("{binary} failed with exit code {code:?}:\nSTDOUT: {stdout}\nSTDERR: {stderr}")]
    Failed {
        binary: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The G2P executable did not finish within the configured bound.
    #[error("{binary} did not finish within {timeout_ms} ms")]
    Timeout { binary: String, timeout_ms: u64 },

    /// Any other I/O problem talking to the child process.
    #[error("unexpected error while running {binary}: {source}")]
    Io {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested locale cannot be served by this backend.
    #[error(transparent)]
    UnsupportedLanguage(#[from] LangError),
}

/// Errors raised when parsing a `voice#speaker` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceSpecError {
    #[error("voice name is empty in {0:?}")]
    EmptyVoice(String),

    #[error("invalid speaker suffix {suffix:?} in voice {spec:?}: expected a non-negative integer")]
    InvalidSpeaker { spec: String, suffix: String },
}

/// Errors raised by an acoustic engine behind [`crate::voice::SpeechEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("speaker id {speaker} out of range (voice has {num_speakers} speakers)")]
    SpeakerOutOfRange { speaker: i64, num_speakers: u32 },

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Errors from the text → audio pipeline in [`crate::voice::Frontend`].
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Phonemizer(#[from] PhonemizerError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
