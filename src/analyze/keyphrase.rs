//! Frequency-ranked unigram/bigram keyphrases.
//!
//! Tokens shorter than three characters and stopwords are dropped first;
//! bigrams are formed from adjacent surviving tokens. Unigrams and bigrams
//! share one frequency table. Ties keep first-occurrence order in the
//! unigrams-then-bigrams sequence, never alphabetical order.

use std::collections::{HashMap, HashSet};

use crate::ingest::NormalizedText;

/// Tokens that survive keyphrase filtering, in text order.
pub fn filtered_tokens<'a>(text: &'a NormalizedText, stopwords: &HashSet<String>) -> Vec<&'a str> {
    text.words()
        .filter(|w| w.len() > 2 && !stopwords.contains(*w))
        .collect()
}

/// Frequency table that remembers the order keys were first seen.
#[derive(Debug, Default)]
pub(crate) struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounter {
    pub(crate) fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Descending count; the sort is stable so ties stay in insertion order.
    pub(crate) fn most_common(mut self, n: usize) -> Vec<(String, usize)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(n);
        self.entries
    }

    pub(crate) fn retain(&mut self, keep: impl Fn(&str) -> bool) {
        self.entries.retain(|(k, _)| keep(k.as_str()));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Top `top_n` keyphrases, most frequent first.
pub fn extract_keyphrases(
    text: &NormalizedText,
    stopwords: &HashSet<String>,
    top_n: usize,
) -> Vec<String> {
    if top_n == 0 {
        return Vec::new();
    }
    let toks = filtered_tokens(text, stopwords);
    if toks.is_empty() {
        return Vec::new();
    }

    let mut counts = OrderedCounter::default();
    for t in &toks {
        counts.add(t);
    }
    for pair in toks.windows(2) {
        counts.add(&format!("{} {}", pair[0], pair[1]));
    }
    counts.retain(|k| !is_all_digits(k));

    counts
        .most_common(top_n)
        .into_iter()
        .map(|(k, _)| k)
        .collect()
}
