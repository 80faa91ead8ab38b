//! Phoneme → id mapping for Piper-style voices.
//!
//! A voice ships a `phoneme_id_map` (phoneme → list of ids).  A sentence is
//! framed as:
//!
//! ```text
//! ids(^)  ids(p1) ids(_)  ids(p2) ids(_) ... ids(pn) ids(_)  ids($)
//! ```
//!
//! Phonemes missing from the map are logged and skipped.

use std::collections::HashMap;

/// Padding symbol, emitted after every phoneme.
pub const PAD: &str = "_";
/// Beginning of sentence.
pub const BOS: &str = "^";
/// End of sentence.
pub const EOS: &str = "$";

/// Phoneme → ids, as found in a voice's `model.onnx.json`.
pub type PhonemeIdMap = HashMap<String, Vec<i64>>;

fn ids_of<'a>(id_map: &'a PhonemeIdMap, symbol: &str) -> &'a [i64] {
    match id_map.get(symbol) {
        Some(ids) => ids,
        None => {
            tracing::warn!(symbol, "framing symbol missing from phoneme id map");
            &[]
        }
    }
}

/// Map one sentence of phonemes to model input ids.
pub fn phonemes_to_ids<S: AsRef<str>>(phonemes: &[S], id_map: &PhonemeIdMap) -> Vec<i64> {
    let pad = ids_of(id_map, PAD);
    let mut ids: Vec<i64> = ids_of(id_map, BOS).to_vec();
    for phoneme in phonemes.iter().map(AsRef::as_ref) {
        let Some(phoneme_ids) = id_map.get(phoneme) else {
            tracing::warn!(phoneme, "missing phoneme from id map");
            continue;
        };
        ids.extend_from_slice(phoneme_ids);
        ids.extend_from_slice(pad);
    }
    ids.extend_from_slice(ids_of(id_map, EOS));
    ids
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
