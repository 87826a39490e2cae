// src/analyze/mod.rs
//! Tagging pipeline: one normalization pass per item, shared by the lexicon
//! matcher, the keyphrase extractor and the sentiment scorer.

pub mod corpus;
pub mod keyphrase;
pub mod lexicon;

use metrics::{counter, describe_counter, describe_gauge};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::sync::Arc;

use crate::config::TaggerConfig;
use crate::debug::log_record;
use crate::ingest::types::{ItemKind, RawItem};
use crate::ingest::{is_removed_placeholder, normalize, normalize_opt, NormalizedText};
use crate::record::TaggedRecord;
use crate::sentiment::SentimentScorer;

// Re-export convenient functions.
pub use crate::analyze::corpus::{top_terms, SentimentDistribution};
pub use crate::analyze::keyphrase::extract_keyphrases;
pub use crate::analyze::lexicon::{match_barriers, match_topics, merge_topics};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("tagger_records_total", "Records assembled by the tagger.");
        describe_counter!(
            "tagger_placeholders_skipped_total",
            "Batch items skipped because the body was [deleted] or [removed]."
        );
        describe_gauge!(
            "tagger_sentiment_degraded",
            "1 when the sentiment model fell back to neutral scores."
        );
    });
}

/// Immutable tagging pipeline. Cheap to clone, safe to share across threads.
#[derive(Debug, Clone)]
pub struct Tagger {
    cfg: Arc<TaggerConfig>,
    sentiment: SentimentScorer,
}

impl Tagger {
    /// Builds the scorer from `cfg.sentiment`; a missing lexicon degrades to
    /// neutral scoring with a single warning.
    pub fn new(cfg: TaggerConfig) -> Self {
        ensure_metrics_described();
        let sentiment = SentimentScorer::init(&cfg.sentiment);
        Self::with_scorer(cfg, sentiment)
    }

    pub fn with_scorer(cfg: TaggerConfig, sentiment: SentimentScorer) -> Self {
        Self {
            cfg: Arc::new(cfg),
            sentiment,
        }
    }

    pub fn config(&self) -> &TaggerConfig {
        &self.cfg
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    /// Keyphrase budget for an item kind.
    pub fn top_n_for(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Post => self.cfg.top_n,
            ItemKind::Comment => self.cfg.comment_top_n,
        }
    }

    pub fn topics(&self, text: &NormalizedText) -> Vec<String> {
        match_topics(text, &self.cfg.topics)
    }

    pub fn keyphrases(&self, text: &NormalizedText, top_n: usize) -> Vec<String> {
        extract_keyphrases(text, &self.cfg.stopwords, top_n)
    }

    /// Tag one item. A missing body yields an empty, neutral record.
    pub fn assemble(&self, item: &RawItem) -> TaggedRecord {
        self.assemble_with_headings(item, None)
    }

    /// Like [`Tagger::assemble`], additionally folding in topics found in page
    /// headings. `None` (collaborator failed or was not asked) contributes
    /// nothing.
    pub fn assemble_with_headings(
        &self,
        item: &RawItem,
        headings: Option<&[String]>,
    ) -> TaggedRecord {
        let text = normalize_opt(item.body_str());

        let sentiment_score = self.sentiment.score(&text);
        let sentiment_label = self.sentiment.label(sentiment_score);
        let keyphrases = self.keyphrases(&text, self.top_n_for(item.kind));
        let barrier_tags = match_barriers(&text, &self.cfg.barriers);
        let mut matched_topics = self.topics(&text);

        if let Some(hs) = headings {
            let extra: Vec<String> = hs
                .iter()
                .flat_map(|h| self.topics(&normalize(h)))
                .collect();
            matched_topics = merge_topics(matched_topics, extra);
        }

        let rec = TaggedRecord {
            id: item.id.clone(),
            kind: item.kind,
            source: item.source.clone(),
            parent_id: item.parent_id.clone(),
            author: item.author.clone(),
            score: item.score,
            created_utc: item.created_utc,
            body: item.body.clone().unwrap_or_default(),
            clean_text: text.into_string(),
            sentiment_score,
            sentiment_label,
            keyphrases,
            barrier_tags,
            matched_topics,
        };
        counter!("tagger_records_total").increment(1);
        log_record(&rec);
        rec
    }

    /// Tag a batch in input order, in parallel. Items whose body is one of
    /// Reddit's `[deleted]` / `[removed]` placeholders are skipped.
    pub fn assemble_batch(&self, items: &[RawItem]) -> Vec<TaggedRecord> {
        let out: Vec<TaggedRecord> = items
            .par_iter()
            .filter(|it| !it.body_str().is_some_and(is_removed_placeholder))
            .map(|it| self.assemble(it))
            .collect();

        let skipped = items.len() - out.len();
        if skipped > 0 {
            tracing::info!(skipped, "skipped placeholder bodies");
            counter!("tagger_placeholders_skipped_total").increment(skipped as u64);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::{NeutralModel, SentimentLabel};

    fn tagger() -> Tagger {
        Tagger::new(TaggerConfig::default())
    }

    #[test]
    fn null_body_gives_neutral_empty_record() {
        let it = RawItem {
            id: "c0".into(),
            body: None,
            ..RawItem::default()
        };
        let rec = tagger().assemble(&it);
        assert_eq!(rec.body, "");
        assert_eq!(rec.clean_text, "");
        assert_eq!(rec.sentiment_score, 0.0);
        assert_eq!(rec.sentiment_label, SentimentLabel::Neutral);
        assert!(rec.keyphrases.is_empty());
        assert!(rec.barrier_tags.is_empty());
        assert!(rec.matched_topics.is_empty());
    }

    #[test]
    fn tags_come_from_clean_text_not_markup() {
        // "port" only appears inside the URL and the tag attribute
        let it = RawItem::comment(
            "c1",
            r#"<a href="https://port.example.com">link</a> see https://port.example.com"#,
        );
        let rec = tagger().assemble(&it);
        assert!(rec.matched_topics.is_empty(), "{:?}", rec.matched_topics);
        assert_eq!(rec.clean_text, "link see");
    }

    #[test]
    fn keyphrase_budget_by_kind() {
        let words = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let t = tagger();
        let post = t.assemble(&RawItem::post("p", words, ""));
        let comment = t.assemble(&RawItem::comment("c", words));
        assert_eq!(post.keyphrases.len(), 8);
        assert_eq!(comment.keyphrases.len(), 6);
    }

    #[test]
    fn headings_merge_after_body_topics() {
        let it = RawItem::post("p1", "Port fees and IMO rules", "");
        let headings = vec!["Wind propulsion policy".to_string(), "IMO".to_string()];
        let rec = tagger().assemble_with_headings(&it, Some(headings.as_slice()));
        assert_eq!(rec.matched_topics, vec!["imo", "port", "policy", "wind propulsion"]);
        let none = tagger().assemble_with_headings(&it, None);
        assert_eq!(none.matched_topics, vec!["imo", "port"]);
    }

    #[test]
    fn neutral_scorer_still_tags() {
        let t = Tagger::with_scorer(
            TaggerConfig::default(),
            SentimentScorer::with_model(Arc::new(NeutralModel)),
        );
        let rec = t.assemble(&RawItem::comment("c", "The subsidy is amazing"));
        assert_eq!(rec.sentiment_score, 0.0);
        assert!(rec.barrier_tags.contains("economic"));
    }

    #[test]
    fn batch_skips_placeholders_and_keeps_order() {
        let items = vec![
            RawItem::comment("a", "first crew comment"),
            RawItem::comment("b", "[deleted]"),
            RawItem::comment("c", "[removed]"),
            RawItem::comment("d", "second berth comment"),
        ];
        let out = tagger().assemble_batch(&items);
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }
}
