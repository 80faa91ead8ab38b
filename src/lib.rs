//! # piper-frontend
//!
//! Text front end for [Piper](https://github.com/rhasspy/piper)-style neural
//! text-to-speech voices: raw text in, per-sentence phoneme ids out.
//!
//! ## Quick start
//!
//! ```no_run
//! use piper_frontend::{FrontendConfig, Frontend};
//!
//! let frontend = Frontend::new(FrontendConfig::default());
//! let sentences = frontend.phonemize("Dr. Smith arrives at 19h30.").unwrap();
//! for phonemes in &sentences {
//!     println!("{}", phonemes.concat());
//! }
//! ```
//!
//! Normalisation and phonemisation can also be used on their own:
//!
//! ```
//! use piper_frontend::{normalize, CodepointPhonemizer, Phonemizer};
//!
//! assert_eq!(normalize("I'm 5", "en"), "I am five");
//! let phonemes = CodepointPhonemizer::default().phonemize("olá", "pt").unwrap();
//! assert_eq!(phonemes.len(), 1);
//! ```
//!
//! ## Pipeline
//! 1. **Normalisation**: dates, times, units, numbers, fractions, titles and
//!    contractions → spoken words ([`mod@normalize`]).
//! 2. **Chunking**: sentences split at clause delimiters ([`mod@chunk`]).
//! 3. **Phonemisation**: `espeak-ng` IPA or Unicode codepoints
//!    ([`mod@phonemize`]).
//! 4. **Id mapping**: phonemes → model ids with `^`/`_`/`$` framing
//!    ([`tokenize`]).
//! 5. **Synthesis**: behind the [`SpeechEngine`] trait; with the `onnx`
//!    feature, [`model::OnnxVoice`] runs the voice with ONNX Runtime.
//!
//! ## Runtime requirements
//! | Backend   | Requirement                                               |
//! |-----------|-----------------------------------------------------------|
//! | espeak    | `espeak-ng` on `PATH` (`apt install espeak-ng`, `brew install espeak-ng`) |
//! | text      | none                                                      |

pub mod chunk;
pub mod config;
pub mod datetime;
pub mod error;
pub mod lang;
pub mod lexicon;
#[cfg(feature = "onnx")]
pub mod model;
pub mod normalize;
pub mod numbers;
pub mod phonemize;
pub mod tokenize;
pub mod voice;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use chunk::{chunk_text, Chunker, TextChunk};
pub use config::{FrontendConfig, PhonemeType, VoiceConfig};
pub use error::{EngineError, FrontendError, LangError, PhonemizerError, VoiceSpecError};
pub use lang::match_lang;
pub use normalize::{normalize, Normalizer};
pub use phonemize::{
    Backend, CodepointPhonemizer, EspeakPhonemizer, Phonemizer, SentenceGrouping, TextCasing,
    UnicodeForm,
};
pub use tokenize::{phonemes_to_ids, PhonemeIdMap};
pub use voice::{EngineCache, Frontend, SpeechEngine, SynthesisScales, VoiceSpec};
