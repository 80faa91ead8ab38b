//! JSON configuration.
//!
//! [`FrontendConfig`] drives normalisation and phonemisation; every field has
//! a default so an empty object `{}` is a valid config.  [`VoiceConfig`] is the
//! `model.onnx.json` file shipped next to a Piper voice.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chunk::DEFAULT_DELIMITERS;
use crate::phonemize::{SentenceGrouping, TextCasing, UnicodeForm, DEFAULT_ESPEAK_BINARY};
use crate::tokenize::PhonemeIdMap;
use crate::voice::SynthesisScales;

/// Which phonemizer backend a voice was trained with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeType {
    /// IPA from `espeak-ng`.
    #[default]
    Espeak,
    /// Unicode codepoints.
    Text,
}

// ─────────────────────────────────────────────────────────────────────────────
// Front end
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Language of the input text.
    pub lang: String,
    pub phoneme_type: PhonemeType,
    /// Run the text normaliser before phonemisation.
    pub normalize: bool,
    pub unicode_form: UnicodeForm,
    pub casing: TextCasing,
    pub delimiters: Vec<String>,
    pub espeak_binary: String,
    /// Milliseconds; 0 waits forever.
    pub espeak_timeout_ms: u64,
    pub sentence_grouping: SentenceGrouping,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            lang: "en-us".to_string(),
            phoneme_type: PhonemeType::Espeak,
            normalize: true,
            unicode_form: UnicodeForm::Nfd,
            casing: TextCasing::Ignore,
            delimiters: DEFAULT_DELIMITERS.iter().map(|d| d.to_string()).collect(),
            espeak_binary: DEFAULT_ESPEAK_BINARY.to_string(),
            espeak_timeout_ms: 10_000,
            sentence_grouping: SentenceGrouping::Chunk,
        }
    }
}

impl FrontendConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse front end config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config: {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Defaults matching a voice: its espeak voice as language and its
    /// phoneme type.
    pub fn for_voice(voice: &VoiceConfig) -> Self {
        Self {
            lang: voice.espeak.voice.clone(),
            phoneme_type: voice.phoneme_type,
            ..Self::default()
        }
    }

    pub fn espeak_timeout(&self) -> Option<Duration> {
        match self.espeak_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// model.onnx.json
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspeakConfig {
    /// espeak-ng voice or alphabet name.
    pub voice: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub noise_scale: f32,
    pub length_scale: f32,
    pub noise_w: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.667,
            length_scale: 1.0,
            noise_w: 0.8,
        }
    }
}

/// Deserialised `model.onnx.json` of a Piper voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub num_symbols: u32,
    pub num_speakers: u32,
    pub audio: AudioConfig,
    pub espeak: EspeakConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    pub phoneme_id_map: PhonemeIdMap,
    #[serde(default)]
    pub phoneme_type: PhonemeType,
}

impl VoiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse voice config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read voice config: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse voice config: {}", path.display()))
    }

    pub fn sample_rate(&self) -> u32 {
        self.audio.sample_rate
    }

    /// Inference scales configured by the voice.
    pub fn scales(&self) -> SynthesisScales {
        SynthesisScales {
            noise_scale: self.inference.noise_scale,
            length_scale: self.inference.length_scale,
            noise_w: self.inference.noise_w,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
