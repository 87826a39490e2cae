//! Topic and barrier tagging by plain substring containment.
//!
//! Matching is deliberately not word-boundary aware: "roi" inside "heroic"
//! counts. Triggers and text are both normalized, so the only thing compared
//! is the canonical lowercase form.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::ingest::NormalizedText;

/// Topics found in `text`, in topic-list order, without duplicates.
pub fn match_topics<S: AsRef<str>>(text: &NormalizedText, topics: &[S]) -> Vec<String> {
    let t = text.as_str();
    if t.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    topics
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|kw| !kw.is_empty() && t.contains(*kw))
        .filter(|kw| seen.insert(*kw))
        .map(str::to_string)
        .collect()
}

/// Categories with at least one trigger present in `text`.
pub fn match_barriers<S: AsRef<str>>(
    text: &NormalizedText,
    lexicon: &BTreeMap<String, Vec<S>>,
) -> BTreeSet<String> {
    let t = text.as_str();
    if t.is_empty() {
        return BTreeSet::new();
    }
    lexicon
        .iter()
        .filter(|(_, triggers)| {
            triggers
                .iter()
                .map(AsRef::<str>::as_ref)
                .any(|w| !w.is_empty() && t.contains(w))
        })
        .map(|(category, _)| category.clone())
        .collect()
}

/// Order-preserving union: everything in `primary`, then unseen `extra` items.
pub fn merge_topics(primary: Vec<String>, extra: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = primary.iter().cloned().collect();
    let mut out = primary;
    for e in extra {
        if seen.insert(e.clone()) {
            out.push(e);
        }
    }
    out
}
