// src/debug.rs
//! Anonymized per-item diagnostics. Raw text is never logged; items are
//! identified by a short SHA-256 prefix of their normalized text.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::record::TaggedRecord;

pub(crate) fn anon_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: impl IntoIterator<Item = T>, max: usize) -> Vec<String> {
    v.into_iter().take(max).map(|x| x.to_string()).collect()
}

/// Debug-level trace of one assembled record.
pub(crate) fn log_record(rec: &TaggedRecord) {
    if !tracing::enabled!(target: "tagger", tracing::Level::DEBUG) {
        return;
    }
    let text_id = anon_hash(&rec.clean_text);
    debug!(
        target: "tagger",
        item = %rec.id,
        %text_id,
        score = rec.sentiment_score,
        label = %rec.sentiment_label,
        keyphrases = ?truncate_vec(&rec.keyphrases, 5),
        barriers = ?truncate_vec(&rec.barrier_tags, 5),
        topics = ?truncate_vec(&rec.matched_topics, 5),
    );
}
