//! Text → phoneme ids → PCM, up to the acoustic-model boundary.
//!
//! The neural model itself sits behind [`SpeechEngine`]; the `onnx` feature
//! provides [`crate::model::OnnxVoice`] as one implementation.  Loaded
//! engines can be shared through an [`EngineCache`].

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;

use crate::config::FrontendConfig;
use crate::error::{EngineError, FrontendError, PhonemizerError, VoiceSpecError};
use crate::normalize::Normalizer;
use crate::phonemize::{Backend, PhonemeSentence, Phonemizer};
use crate::tokenize::{phonemes_to_ids, PhonemeIdMap};

/// Largest absolute 16-bit sample value produced.
pub const MAX_WAV_VALUE: f32 = 32767.0;

// ─────────────────────────────────────────────────────────────────────────────
// Voice names
// ─────────────────────────────────────────────────────────────────────────────

/// A voice name with an optional speaker, written `voice#speaker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoiceSpec {
    pub voice: String,
    pub speaker: Option<i64>,
}

impl VoiceSpec {
    /// `"alan-low#1"` → voice `alan-low`, speaker 1.  A missing or empty
    /// suffix means the default speaker.
    pub fn parse(spec: &str) -> Result<Self, VoiceSpecError> {
        let (voice, suffix) = match spec.split_once('#') {
            Some((voice, suffix)) => (voice.trim(), suffix.trim()),
            None => (spec.trim(), ""),
        };
        if voice.is_empty() {
            return Err(VoiceSpecError::EmptyVoice(spec.to_string()));
        }
        let speaker = match suffix {
            "" => None,
            s => match s.parse::<i64>() {
                Ok(id) if id >= 0 => Some(id),
                _ => {
                    return Err(VoiceSpecError::InvalidSpeaker {
                        spec: spec.to_string(),
                        suffix: s.to_string(),
                    })
                }
            },
        };
        Ok(Self {
            voice: voice.to_string(),
            speaker,
        })
    }
}

impl FromStr for VoiceSpec {
    type Err = VoiceSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VoiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Some(id) => write!(f, "{}#{}", self.voice, id),
            None => f.write_str(&self.voice),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine boundary
// ─────────────────────────────────────────────────────────────────────────────

/// Noise and duration controls passed to the acoustic model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisScales {
    /// Generator noise.
    pub noise_scale: f32,
    /// Phoneme length; larger is slower.
    pub length_scale: f32,
    /// Phoneme width noise.
    pub noise_w: f32,
}

impl Default for SynthesisScales {
    fn default() -> Self {
        Self {
            noise_scale: 0.667,
            length_scale: 1.0,
            noise_w: 0.8,
        }
    }
}

impl SynthesisScales {
    /// Model input order: noise, length, noise width.
    pub fn to_array(self) -> [f32; 3] {
        [self.noise_scale, self.length_scale, self.noise_w]
    }
}

/// An acoustic model: phoneme ids in, 16-bit mono PCM out.
pub trait SpeechEngine: Send + Sync {
    fn sample_rate(&self) -> u32;

    fn phoneme_id_map(&self) -> &PhonemeIdMap;

    /// Little-endian 16-bit mono PCM for one sentence of ids.
    fn synthesize(
        &self,
        phoneme_ids: &[i64],
        speaker: Option<i64>,
        scales: &SynthesisScales,
    ) -> Result<Vec<u8>, EngineError>;
}

/// Speaker id to feed a model with `num_speakers` speakers: single-speaker
/// models take none, multi-speaker models default to speaker 0.
pub fn resolve_speaker(
    num_speakers: u32,
    speaker: Option<i64>,
) -> Result<Option<i64>, EngineError> {
    if num_speakers <= 1 {
        return Ok(None);
    }
    let id = speaker.unwrap_or(0);
    if id < 0 || id >= i64::from(num_speakers) {
        return Err(EngineError::SpeakerOutOfRange {
            speaker: id,
            num_speakers,
        });
    }
    Ok(Some(id))
}

/// Peak-normalise float samples and convert them to 16-bit PCM bytes.
pub fn audio_float_to_int16(audio: &[f32]) -> Vec<u8> {
    let peak = audio.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let scale = MAX_WAV_VALUE / peak.max(0.01);
    audio
        .iter()
        .flat_map(|&s| {
            let v = (s * scale).clamp(-MAX_WAV_VALUE, MAX_WAV_VALUE) as i16;
            v.to_le_bytes()
        })
        .collect()
}

/// Zeroed 16-bit mono PCM lasting `seconds`.
pub fn silence_bytes(seconds: f32, sample_rate: u32) -> Vec<u8> {
    let samples = (seconds.max(0.0) * sample_rate as f32) as usize;
    vec![0u8; samples * 2]
}

/// Write 16-bit little-endian mono PCM to a WAV file.
pub fn write_wav(pcm: &[u8], sample_rate: u32, output_path: &Path) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(output_path, spec)
        .with_context(|| format!("Cannot create WAV: {}", output_path.display()))?;
    for sample in pcm.chunks_exact(2) {
        writer
            .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
            .context("WAV write error")?;
    }
    writer.finalize().context("WAV finalise error")?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine cache
// ─────────────────────────────────────────────────────────────────────────────

/// Loaded engines keyed by voice id.  Owned by the caller; no global state.
#[derive(Debug)]
pub struct EngineCache<E> {
    engines: HashMap<String, Arc<E>>,
}

impl<E> Default for EngineCache<E> {
    fn default() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }
}

impl<E> EngineCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, voice: &str) -> Option<Arc<E>> {
        self.engines.get(voice).cloned()
    }

    pub fn insert(&mut self, voice: impl Into<String>, engine: E) -> Arc<E> {
        let engine = Arc::new(engine);
        self.engines.insert(voice.into(), Arc::clone(&engine));
        engine
    }

    /// The cached engine for `voice`, loading it with `load` on a miss.  A
    /// failed load leaves the cache unchanged.
    pub fn get_or_try_insert_with<F, Err>(&mut self, voice: &str, load: F) -> Result<Arc<E>, Err>
    where
        F: FnOnce() -> Result<E, Err>,
    {
        if let Some(engine) = self.engines.get(voice) {
            return Ok(Arc::clone(engine));
        }
        tracing::debug!(voice, "loading voice into engine cache");
        let engine = load()?;
        Ok(self.insert(voice, engine))
    }

    pub fn evict(&mut self, voice: &str) -> Option<Arc<E>> {
        self.engines.remove(voice)
    }

    pub fn clear(&mut self) {
        self.engines.clear();
    }

    pub fn contains(&self, voice: &str) -> bool {
        self.engines.contains_key(voice)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Front end pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Normaliser and phonemizer configured for one language.
pub struct Frontend {
    config: FrontendConfig,
    normalizer: Option<Normalizer>,
    backend: Backend,
}

impl Frontend {
    pub fn new(config: FrontendConfig) -> Self {
        let normalizer = config.normalize.then(|| Normalizer::new(&config.lang));
        let backend = Backend::from_config(&config);
        Self {
            config,
            normalizer,
            backend,
        }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Text as it will be phonemized.
    pub fn prepare_text(&self, text: &str) -> String {
        match &self.normalizer {
            Some(n) => n.normalize(text),
            None => text.to_string(),
        }
    }

    /// Phonemes grouped by sentence.
    pub fn phonemize(&self, text: &str) -> Result<Vec<PhonemeSentence>, PhonemizerError> {
        let prepared = self.prepare_text(text);
        self.backend.phonemize(&prepared, &self.config.lang)
    }

    /// Model input ids, one vector per sentence.
    pub fn text_to_ids(
        &self,
        text: &str,
        id_map: &PhonemeIdMap,
    ) -> Result<Vec<Vec<i64>>, PhonemizerError> {
        Ok(self
            .phonemize(text)?
            .iter()
            .map(|sentence| phonemes_to_ids(sentence, id_map))
            .collect())
    }

    /// PCM for `text`: each sentence synthesized in turn and followed by
    /// `sentence_silence` seconds of silence.  Sentences without phonemes
    /// are skipped.
    pub fn synthesize<E: SpeechEngine + ?Sized>(
        &self,
        engine: &E,
        text: &str,
        speaker: Option<i64>,
        scales: &SynthesisScales,
        sentence_silence: f32,
    ) -> Result<Vec<u8>, FrontendError> {
        let silence = silence_bytes(sentence_silence, engine.sample_rate());
        let mut audio = Vec::new();
        for sentence in self.phonemize(text)? {
            if sentence.is_empty() {
                tracing::debug!("skipping sentence without phonemes");
                continue;
            }
            let ids = phonemes_to_ids(&sentence, engine.phoneme_id_map());
            audio.extend(engine.synthesize(&ids, speaker, scales)?);
            audio.extend_from_slice(&silence);
        }
        Ok(audio)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhonemeType;
    use std::sync::Mutex;

    /// Emits one sample per id and records every call.
    struct CountingEngine {
        id_map: PhonemeIdMap,
        calls: Mutex<Vec<Vec<i64>>>,
    }

    impl CountingEngine {
        fn new() -> Self {
            let id_map = [("_", 0), ("^", 1), ("$", 2), ("a", 3), ("b", 4), ("c", 5)]
                .into_iter()
                .map(|(p, id)| (p.to_string(), vec![id]))
                .collect();
            Self {
                id_map,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl SpeechEngine for CountingEngine {
        fn sample_rate(&self) -> u32 {
            10
        }

        fn phoneme_id_map(&self) -> &PhonemeIdMap {
            &self.id_map
        }

        fn synthesize(
            &self,
            phoneme_ids: &[i64],
            speaker: Option<i64>,
            _scales: &SynthesisScales,
        ) -> Result<Vec<u8>, EngineError> {
            resolve_speaker(2, speaker)?;
            self.calls.lock().unwrap().push(phoneme_ids.to_vec());
            Ok(vec![1u8; phoneme_ids.len() * 2])
        }
    }

    fn text_frontend() -> Frontend {
        Frontend::new(FrontendConfig {
            phoneme_type: PhonemeType::Text,
            normalize: false,
            ..FrontendConfig::default()
        })
    }

    #[test]
    fn test_voice_spec_parse() {
        let spec = VoiceSpec::parse("alan-low#1").unwrap();
        assert_eq!(spec.voice, "alan-low");
        assert_eq!(spec.speaker, Some(1));
        assert_eq!(VoiceSpec::parse("alan-low").unwrap().speaker, None);
        assert_eq!(VoiceSpec::parse("alan-low#").unwrap().speaker, None);
        assert_eq!(spec.to_string(), "alan-low#1");
    }

    #[test]
    fn test_voice_spec_errors() {
        assert_eq!(
            VoiceSpec::parse("alan-low#x"),
            Err(VoiceSpecError::InvalidSpeaker {
                spec: "alan-low#x".to_string(),
                suffix: "x".to_string()
            })
        );
        assert!(matches!(VoiceSpec::parse("#2"), Err(VoiceSpecError::EmptyVoice(_))));
        assert!("alan-low#-1".parse::<VoiceSpec>().is_err());
    }

    #[test]
    fn test_resolve_speaker() {
        assert_eq!(resolve_speaker(1, Some(3)).unwrap(), None);
        assert_eq!(resolve_speaker(4, None).unwrap(), Some(0));
        assert_eq!(resolve_speaker(4, Some(3)).unwrap(), Some(3));
        assert!(matches!(
            resolve_speaker(4, Some(4)),
            Err(EngineError::SpeakerOutOfRange { speaker: 4, num_speakers: 4 })
        ));
    }

    #[test]
    fn test_audio_float_to_int16() {
        let pcm = audio_float_to_int16(&[0.5, -0.25, 0.0]);
        let samples: Vec<i16> = pcm
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(samples, vec![32767, -16383, 0]);
        // Quiet audio is not boosted past the 0.01 floor.
        let quiet = audio_float_to_int16(&[0.001]);
        assert_eq!(i16::from_le_bytes([quiet[0], quiet[1]]), 3276);
        assert!(audio_float_to_int16(&[]).is_empty());
    }

    #[test]
    fn test_silence_bytes() {
        assert_eq!(silence_bytes(0.5, 22050).len(), 22050);
        assert!(silence_bytes(0.0, 22050).is_empty());
        assert!(silence_bytes(-1.0, 22050).is_empty());
    }

    #[test]
    fn test_write_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let pcm = audio_float_to_int16(&[0.5, -0.5, 0.0]);
        write_wav(&pcm, 22050, &path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![32767, -32767, 0]);
    }

    #[test]
    fn test_engine_cache() {
        let mut cache: EngineCache<u32> = EngineCache::new();
        assert!(cache.is_empty());
        let a = cache.get_or_try_insert_with("a", || Ok::<_, String>(1)).unwrap();
        assert_eq!(*a, 1);
        let again = cache
            .get_or_try_insert_with("a", || Err::<u32, _>("must not load".to_string()))
            .unwrap();
        assert!(Arc::ptr_eq(&a, &again));

        let failed = cache.get_or_try_insert_with("b", || Err::<u32, _>("boom".to_string()));
        assert_eq!(failed.unwrap_err(), "boom");
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains("b"));

        assert_eq!(cache.evict("a").as_deref(), Some(&1));
        assert!(cache.get("a").is_none());
        cache.insert("c", 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_frontend_text_to_ids() {
        let frontend = text_frontend();
        let engine = CountingEngine::new();
        let ids = frontend.text_to_ids("ab, c.", engine.phoneme_id_map()).unwrap();
        assert_eq!(ids, vec![vec![1, 3, 0, 4, 0, 2], vec![1, 5, 0, 2]]);
    }

    #[test]
    fn test_frontend_synthesize_appends_silence() {
        let frontend = text_frontend();
        let engine = CountingEngine::new();
        let pcm = frontend
            .synthesize(&engine, "ab, c.", None, &SynthesisScales::default(), 0.5)
            .unwrap();
        // 6 + 4 ids → 20 bytes, plus 2 × 5 silent samples.
        assert_eq!(pcm.len(), 20 + 20);
        assert_eq!(&pcm[12..22], &[0u8; 10]);
        assert_eq!(engine.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_frontend_synthesize_engine_error() {
        let frontend = text_frontend();
        let engine = CountingEngine::new();
        let err = frontend
            .synthesize(&engine, "ab", Some(7), &SynthesisScales::default(), 0.0)
            .unwrap_err();
        assert!(matches!(err, FrontendError::Engine(_)), "got: {}", err);
    }

    #[test]
    fn test_frontend_normalizes_first() {
        let frontend = Frontend::new(FrontendConfig {
            phoneme_type: PhonemeType::Text,
            ..FrontendConfig::default()
        });
        assert_eq!(frontend.prepare_text("Dr. Smith"), "Doctor Smith");
        assert_eq!(text_frontend().prepare_text("Dr. Smith"), "Dr. Smith");
    }
}
