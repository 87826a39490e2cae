//! Compound sentiment score in [-1, 1] and the three-way label derived from it.
//!
//! The numeric model sits behind [`PolarityModel`]. The built-in model is a
//! valence lexicon with negation, boosters and the "but" shift; when the
//! lexicon cannot be loaded the scorer falls back to [`NeutralModel`] once, at
//! construction, and remembers why.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SentimentSection;
use crate::ingest::NormalizedText;

pub const POSITIVE_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

const EMBEDDED_LEXICON: &str = include_str!("../config/sentiment_lexicon.json");

/// Scalar applied to a valence when a negator precedes it.
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCR: f64 = 0.293;
/// Normalisation constant of the compound score.
const ALPHA: f64 = 15.0;
/// How far back negators/boosters reach.
const LOOKBACK: usize = 3;

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere",
        "without", "cannot", "isn't", "isnt", "wasn't", "wasnt", "aren't", "arent", "won't",
        "wont", "can't", "cant", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt",
        "shouldn't", "shouldnt", "wouldn't", "wouldnt", "couldn't", "couldnt", "ain't", "aint",
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for w in [
        "very", "really", "extremely", "absolutely", "incredibly", "highly", "totally",
        "super", "hugely", "so", "utterly", "completely", "especially", "remarkably",
    ] {
        m.insert(w, BOOSTER_INCR);
    }
    for w in [
        "slightly", "somewhat", "barely", "hardly", "kinda", "kind-of", "marginally", "partly",
        "scarcely", "sort-of",
    ] {
        m.insert(w, -BOOSTER_INCR);
    }
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// `>= 0.05` Positive, `<= -0.05` Negative, otherwise Neutral.
    pub fn from_score(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Black-box polarity model. Same text in, same score out.
pub trait PolarityModel: Send + Sync {
    /// Compound score in [-1, 1].
    fn compound(&self, text: &NormalizedText) -> f64;
    /// Model name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Always 0.0. Used when the real model is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralModel;

impl PolarityModel for NeutralModel {
    fn compound(&self, _text: &NormalizedText) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "neutral"
    }
}

/// Valence lexicon model: word -> valence in [-4, 4].
#[derive(Debug, Clone)]
pub struct LexiconModel {
    lexicon: HashMap<String, f64>,
}

impl LexiconModel {
    /// Lexicon compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_LEXICON).context("embedded sentiment lexicon")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading sentiment lexicon from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("parsing sentiment lexicon {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, f64> = serde_json::from_str(raw)?;
        let lexicon: HashMap<String, f64> = parsed
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k.trim().to_lowercase(), v.clamp(-4.0, 4.0)))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        if lexicon.is_empty() {
            bail!("sentiment lexicon has no usable entries");
        }
        Ok(Self { lexicon })
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn valence(&self, w: &str) -> f64 {
        self.lexicon.get(w).copied().unwrap_or(0.0)
    }
}

fn strip_edges(w: &str) -> &str {
    w.trim_matches(|c: char| c == '\'' || c == '-')
}

impl PolarityModel for LexiconModel {
    fn compound(&self, text: &NormalizedText) -> f64 {
        let tokens: Vec<&str> = text.words().map(strip_edges).filter(|w| !w.is_empty()).collect();
        if tokens.is_empty() {
            return 0.0;
        }
        let but_at = tokens.iter().position(|w| *w == "but");

        let mut sum = 0.0;
        for (i, w) in tokens.iter().enumerate() {
            let base = self.valence(w);
            if base == 0.0 {
                continue;
            }
            let mut v = base;

            // boosters/dampeners, fading with distance
            for k in 1..=LOOKBACK.min(i) {
                if let Some(incr) = BOOSTERS.get(tokens[i - k]) {
                    let fade = 1.0 - 0.05 * (k as f64 - 1.0);
                    v += incr * fade * v.signum();
                }
            }

            // negation within the lookback window
            if (1..=LOOKBACK.min(i)).any(|k| NEGATORS.contains(tokens[i - k])) {
                v *= NEGATION_SCALAR;
            }

            // "but" shifts weight towards the second clause
            if let Some(b) = but_at {
                if i < b {
                    v *= 0.5;
                } else if i > b {
                    v *= 1.5;
                }
            }

            sum += v;
        }

        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

/// Process-wide scorer: a working model or the documented neutral fallback,
/// decided once when it is built.
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn PolarityModel>,
    degraded: Option<String>,
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("model", &self.model.name())
            .field("degraded", &self.degraded)
            .finish()
    }
}

impl SentimentScorer {
    /// Capability check: load the configured (or embedded) lexicon. On failure
    /// log one warning and fall back to [`NeutralModel`].
    pub fn init(section: &SentimentSection) -> Self {
        let loaded = match section.lexicon_path.as_deref() {
            Some(p) => LexiconModel::from_path(p),
            None => LexiconModel::embedded(),
        };
        match loaded {
            Ok(model) => {
                info!(entries = model.len(), "sentiment lexicon loaded");
                metrics::gauge!("tagger_sentiment_degraded").set(0.0);
                Self::with_model(Arc::new(model))
            }
            Err(e) => Self::neutral(format!("{e:#}")),
        }
    }

    pub fn with_model(model: Arc<dyn PolarityModel>) -> Self {
        Self {
            model,
            degraded: None,
        }
    }

    /// Neutral fallback; `reason` is logged once here and kept for callers.
    pub fn neutral(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "sentiment model unavailable, all scores will be 0.0");
        metrics::gauge!("tagger_sentiment_degraded").set(1.0);
        Self {
            model: Arc::new(NeutralModel),
            degraded: Some(reason),
        }
    }

    pub fn score(&self, text: &NormalizedText) -> f64 {
        let s = self.model.compound(text);
        if s.is_finite() {
            s.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn label(&self, score: f64) -> SentimentLabel {
        SentimentLabel::from_score(score)
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Why the scorer runs in neutral mode, if it does.
    pub fn degraded_reason(&self) -> Option<&str> {
        self.degraded.as_deref()
    }
}
