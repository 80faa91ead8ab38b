//! ONNX Runtime voice, enabled with the `onnx` feature.
//!
//! Runs a Piper `.onnx` voice.  Model inputs:
//!
//! | Name            | Shape          | dtype   |
//! |-----------------|----------------|---------|
//! | `input`         | `[1, seq_len]` | int64   |
//! | `input_lengths` | `[1]`          | int64   |
//! | `scales`        | `[3]`          | float32 |
//! | `sid`           | `[1]`          | int64   (multi-speaker voices only) |

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use ort::{session::Session, value::Tensor};

use crate::{
    config::VoiceConfig,
    error::EngineError,
    tokenize::PhonemeIdMap,
    voice::{audio_float_to_int16, resolve_speaker, SpeechEngine, SynthesisScales},
};

/// A loaded Piper voice.
pub struct OnnxVoice {
    session: Mutex<Session>,
    config: VoiceConfig,
}

impl OnnxVoice {
    /// Load `model_path` and its config, by default `<model_path>.json`.
    pub fn load(model_path: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let mut p = model_path.as_os_str().to_owned();
                p.push(".json");
                PathBuf::from(p)
            }
        };
        let config = VoiceConfig::from_file(&config_path)?;

        let session = Session::builder()
            .context("Failed to create ORT session builder")?
            .commit_from_file(model_path)
            .with_context(|| format!("Cannot load ONNX model: {}", model_path.display()))?;

        tracing::debug!(
            model = %model_path.display(),
            sample_rate = config.sample_rate(),
            num_speakers = config.num_speakers,
            "loaded voice"
        );
        Ok(Self {
            session: Mutex::new(session),
            config,
        })
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    fn infer(
        &self,
        ids: &[i64],
        speaker: Option<i64>,
        scales: &SynthesisScales,
    ) -> Result<Vec<f32>> {
        let seq_len = ids.len();
        let t_input = Tensor::<i64>::from_array(([1usize, seq_len], ids.to_vec()))
            .context("Failed to build input tensor")?;
        let t_lengths = Tensor::<i64>::from_array(([1usize], vec![seq_len as i64]))
            .context("Failed to build input_lengths tensor")?;
        let t_scales = Tensor::<f32>::from_array(([3usize], scales.to_array().to_vec()))
            .context("Failed to build scales tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("ORT session mutex poisoned"))?;
        let outputs = match speaker {
            Some(sid) => {
                let t_sid = Tensor::<i64>::from_array(([1usize], vec![sid]))
                    .context("Failed to build sid tensor")?;
                session.run(ort::inputs![
                    "input" => t_input,
                    "input_lengths" => t_lengths,
                    "scales" => t_scales,
                    "sid" => t_sid
                ])
            }
            None => session.run(ort::inputs![
                "input" => t_input,
                "input_lengths" => t_lengths,
                "scales" => t_scales
            ]),
        }
        .context("ONNX inference failed")?;

        // Output 0 is the waveform, shape [1, 1, T].
        let (_shape, audio) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract audio tensor")?;
        Ok(audio.to_vec())
    }
}

impl SpeechEngine for OnnxVoice {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate()
    }

    fn phoneme_id_map(&self) -> &PhonemeIdMap {
        &self.config.phoneme_id_map
    }

    fn synthesize(
        &self,
        phoneme_ids: &[i64],
        speaker: Option<i64>,
        scales: &SynthesisScales,
    ) -> Result<Vec<u8>, EngineError> {
        let speaker = resolve_speaker(self.config.num_speakers, speaker)?;
        let audio = self
            .infer(phoneme_ids, speaker, scales)
            .map_err(|e| EngineError::Inference(format!("{e:#}")))?;
        Ok(audio_float_to_int16(&audio))
    }
}
