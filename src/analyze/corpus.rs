//! Batch-level summaries over tagged records: most common words across a
//! corpus and the label distribution.

use serde::Serialize;
use std::collections::HashSet;

use super::keyphrase::{filtered_tokens, OrderedCounter};
use crate::ingest::NormalizedText;
use crate::record::TaggedRecord;
use crate::sentiment::SentimentLabel;

/// Most common filtered unigrams across all records' clean text, ties by
/// first occurrence. Numeric-only words are ignored.
pub fn top_terms(
    records: &[TaggedRecord],
    stopwords: &HashSet<String>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts = OrderedCounter::default();
    for rec in records {
        let text = NormalizedText::from_normalized(rec.clean_text.clone());
        for t in filtered_tokens(&text, stopwords) {
            if !t.bytes().all(|b| b.is_ascii_digit()) {
                counts.add(t);
            }
        }
    }
    counts.most_common(n)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn from_records(records: &[TaggedRecord]) -> Self {
        let mut d = Self::default();
        for r in records {
            match r.sentiment_label {
                SentimentLabel::Positive => d.positive += 1,
                SentimentLabel::Neutral => d.neutral += 1,
                SentimentLabel::Negative => d.negative += 1,
            }
        }
        d
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}
