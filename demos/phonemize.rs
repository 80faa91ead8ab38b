//! Normalise and phonemize text from the command line.
//!
//! Usage:
//!   cargo run --example phonemize -- --text "Dr. Smith arrives at 19h30."
//!   cargo run --example phonemize -- --lang pt-PT --type text --text "São 14h30."
//!   cargo run --example phonemize -- --voice-config en_US-lessac-medium.onnx.json --text "Hello"
//!
//! Set `RUST_LOG=piper_frontend=debug` to see normaliser and espeak-ng logs.
//!
//! Requirements:
//!   - espeak-ng on $PATH for `--type espeak` (the default)

use std::path::PathBuf;

use piper_frontend::{Frontend, FrontendConfig, PhonemeType, VoiceConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Parse simple CLI arguments ───────────────────────────────────────────
    let mut args = std::env::args().skip(1);

    let mut text          = "Dr. Smith arrives on 08/03/2025 at 19h30, with 12,5kg.".to_string();
    let mut lang          = None;
    let mut phoneme_type  = None;
    let mut config_path   = None;
    let mut voice_path    = None;
    let mut normalize     = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text"         => { if let Some(v) = args.next() { text = v; } }
            "--lang"         => { lang = args.next(); }
            "--type"         => { phoneme_type = args.next(); }
            "--config"       => { config_path = args.next().map(PathBuf::from); }
            "--voice-config" => { voice_path = args.next().map(PathBuf::from); }
            "--no-normalize" => { normalize = false; }
            "--help"         => {
                println!(
                    "Usage: phonemize [--text TEXT] [--lang LANG] [--type espeak|text] \
                     [--config FILE] [--voice-config MODEL.onnx.json] [--no-normalize]"
                );
                return Ok(());
            }
            other => anyhow::bail!("unknown argument {other:?}, try --help"),
        }
    }

    // ── Build configuration ──────────────────────────────────────────────────
    let voice = voice_path.as_deref().map(VoiceConfig::from_file).transpose()?;
    let mut config = match (&config_path, &voice) {
        (Some(path), _) => FrontendConfig::from_file(path)?,
        (None, Some(voice)) => FrontendConfig::for_voice(voice),
        (None, None) => FrontendConfig::default(),
    };
    if let Some(lang) = lang {
        config.lang = lang;
    }
    match phoneme_type.as_deref() {
        Some("espeak") => config.phoneme_type = PhonemeType::Espeak,
        Some("text") => config.phoneme_type = PhonemeType::Text,
        Some(other) => anyhow::bail!("unknown phoneme type {other:?}"),
        None => {}
    }
    config.normalize &= normalize;

    let frontend = Frontend::new(config);

    // ── Run ──────────────────────────────────────────────────────────────────
    println!("Lang       : {}", frontend.config().lang);
    println!("Text       : {:?}", text);
    println!("Normalised : {:?}", frontend.prepare_text(&text));
    println!();

    let sentences = frontend.phonemize(&text)?;
    for (i, phonemes) in sentences.iter().enumerate() {
        println!("[{i}] {}", phonemes.concat());
    }

    if let Some(voice) = &voice {
        println!();
        for (i, ids) in frontend.text_to_ids(&text, &voice.phoneme_id_map)?.iter().enumerate() {
            println!("[{i}] {:?}", ids);
        }
    }
    Ok(())
}
