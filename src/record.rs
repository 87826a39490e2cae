// src/record.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::ingest::types::ItemKind;
use crate::sentiment::SentimentLabel;

/// Separator for list-valued columns in tabular exports.
pub const LIST_SEPARATOR: &str = "|";

/// One tagged item, ready for export. Built only by the tagger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedRecord {
    // passthrough
    pub id: String,
    pub kind: ItemKind,
    pub source: Option<String>,
    pub parent_id: Option<String>,
    pub author: String,
    pub score: i64,
    pub created_utc: Option<i64>,
    /// Original body; empty when the item had none.
    pub body: String,

    // derived
    pub clean_text: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    /// Most frequent first.
    pub keyphrases: Vec<String>,
    pub barrier_tags: BTreeSet<String>,
    /// Topic-list order.
    pub matched_topics: Vec<String>,
}

impl TaggedRecord {
    /// Column order for tabular export.
    pub const EXPORT_FIELDS: [&'static str; 14] = [
        "id",
        "kind",
        "source",
        "parent_id",
        "author",
        "score",
        "created_utc",
        "body",
        "clean_text",
        "sentiment_score",
        "sentiment_label",
        "keyphrases",
        "barrier_tags",
        "matched_topics",
    ];

    /// One cell per [`Self::EXPORT_FIELDS`] entry. Missing optionals become
    /// empty strings and lists are joined with `|`, so every column is present.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.kind.as_str().to_string(),
            self.source.clone().unwrap_or_default(),
            self.parent_id.clone().unwrap_or_default(),
            self.author.clone(),
            self.score.to_string(),
            self.created_utc.map(|t| t.to_string()).unwrap_or_default(),
            self.body.clone(),
            self.clean_text.clone(),
            format!("{:.4}", self.sentiment_score),
            self.sentiment_label.as_str().to_string(),
            self.keyphrases.join(LIST_SEPARATOR),
            join_set(&self.barrier_tags),
            self.matched_topics.join(LIST_SEPARATOR),
        ]
    }
}

fn join_set(s: &BTreeSet<String>) -> String {
    s.iter().map(String::as_str).collect::<Vec<_>>().join(LIST_SEPARATOR)
}
