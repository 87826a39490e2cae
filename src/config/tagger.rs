// src/config/tagger.rs
//! Static tagging configuration: stopwords, topic triggers, barrier lexicon and
//! keyphrase budgets. Built once at start-up and shared read-only afterwards.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::normalize;

// --- env defaults & names ---
pub const DEFAULT_TAGGER_CONFIG_PATH: &str = "config/tagger.toml";
pub const DEFAULT_TOP_N: usize = 8;
pub const DEFAULT_COMMENT_TOP_N: usize = 6;

pub const ENV_TAGGER_CONFIG_PATH: &str = "TAGGER_CONFIG_PATH";
pub const ENV_TAGGER_TOP_N: &str = "TAGGER_TOP_N";

const DEFAULT_TOPICS: &[&str] = &[
    "policy",
    "guidelines",
    "wind propulsion",
    "imo",
    "port",
    "regulation",
    "roi",
    "cost",
    "subsid",
];

const DEFAULT_BARRIERS: &[(&str, &[&str])] = &[
    (
        "economic",
        &[
            "capex", "roi", "payback", "cost", "costs", "subsidy", "subsidies", "grant",
            "funding", "finance", "price", "carbon tax", "ets", "levy",
        ],
    ),
    (
        "regulatory",
        &[
            "imo",
            "eu ets",
            "certification",
            "class",
            "regulation",
            "permit",
            "compliance",
            "policy",
            "rule",
            "port authority",
            "standard",
        ],
    ),
    (
        "operational",
        &[
            "route",
            "wind",
            "maintenance",
            "crew",
            "training",
            "schedule",
            "retrofit",
            "clearance",
            "berth",
            "draft",
            "weather",
            "operational",
        ],
    ),
];

const DEFAULT_STOPWORDS: &str = "
a an the of for and or to is are was were be being been in on with at by from this that these those it its it's as into over under out up down off
you your yours he she they we i me my our their them his her him us
about across after again against all also any because before between both but can could did do does doing during each few further had has have having here how if
just more most no nor not now only other own same should so some such than then there through too until very what when where which who why will would
Fuck fucking wanker punch balls cunts
";

/// `[sentiment]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SentimentSection {
    /// Valence lexicon (JSON object word -> valence). Embedded lexicon when absent.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

/// On-disk schema. Every field is optional; absent lists fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct TaggerFile {
    #[serde(default)]
    top_n: Option<usize>,
    #[serde(default)]
    comment_top_n: Option<usize>,
    #[serde(default)]
    stopwords: Option<Vec<String>>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    barriers: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    sentiment: SentimentSection,
}

/// Validated configuration. Triggers are stored in normalized form, so they
/// can be matched directly against normalized text.
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    pub top_n: usize,
    pub comment_top_n: usize,
    pub stopwords: HashSet<String>,
    /// Ordered; match output follows this order.
    pub topics: Vec<String>,
    /// Category -> triggers. Categories with no usable trigger are dropped.
    pub barriers: BTreeMap<String, Vec<String>>,
    pub sentiment: SentimentSection,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self::from_file(TaggerFile::default())
            .expect("built-in tagger defaults are valid")
    }
}

impl TaggerConfig {
    /// Resolve the config file and apply env overrides:
    /// 1) `$TAGGER_CONFIG_PATH` (must exist)
    /// 2) `config/tagger.toml`
    /// 3) built-in defaults
    ///
    /// `$TAGGER_TOP_N` then overrides `top_n` when it is a positive integer.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_TAGGER_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    return Err(anyhow!(
                        "{ENV_TAGGER_CONFIG_PATH} points to non-existent path {}",
                        pb.display()
                    ));
                }
                Self::from_path(&pb)?
            }
            Err(_) => {
                let default_p = PathBuf::from(DEFAULT_TAGGER_CONFIG_PATH);
                if default_p.exists() {
                    Self::from_path(&default_p)?
                } else {
                    tracing::debug!("no tagger config file found, using built-in defaults");
                    Self::default()
                }
            }
        };

        if let Some(n) = parse_top_n_env(std::env::var(ENV_TAGGER_TOP_N).ok()) {
            cfg.top_n = n;
        }
        Ok(cfg)
    }

    /// Load from an explicit TOML file. A relative `sentiment.lexicon_path` is
    /// resolved against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading tagger config from {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing tagger config {}", path.display()))?;
        if let (Some(lp), Some(dir)) = (cfg.sentiment.lexicon_path.as_ref(), path.parent()) {
            if lp.is_relative() {
                cfg.sentiment.lexicon_path = Some(dir.join(lp));
            }
        }
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: TaggerFile = toml::from_str(s)?;
        Self::from_file(file)
    }

    fn from_file(file: TaggerFile) -> Result<Self> {
        let top_n = file.top_n.unwrap_or(DEFAULT_TOP_N);
        let comment_top_n = file.comment_top_n.unwrap_or(DEFAULT_COMMENT_TOP_N);
        if top_n == 0 || comment_top_n == 0 {
            bail!("top_n and comment_top_n must be positive");
        }

        let stopwords: HashSet<String> = match file.stopwords {
            Some(v) => v.iter().flat_map(|w| split_words(w)).collect(),
            None => DEFAULT_STOPWORDS.split_whitespace().map(str::to_string).collect(),
        };

        let topics = match file.topics {
            Some(v) => clean_triggers(v.iter().map(String::as_str)),
            None => clean_triggers(DEFAULT_TOPICS.iter().copied()),
        };

        let raw_barriers: Vec<(String, Vec<String>)> = match file.barriers {
            Some(m) => m.into_iter().collect(),
            None => DEFAULT_BARRIERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        };
        let mut barriers = BTreeMap::new();
        for (category, triggers) in raw_barriers {
            let category = category.trim().to_string();
            let triggers = clean_triggers(triggers.iter().map(String::as_str));
            if category.is_empty() || triggers.is_empty() {
                tracing::warn!(%category, "barrier category has no usable triggers, skipped");
                continue;
            }
            barriers.insert(category, triggers);
        }

        Ok(Self {
            top_n,
            comment_top_n,
            stopwords,
            topics,
            barriers,
            sentiment: file.sentiment,
        })
    }
}

// parse optional positive integer env
fn parse_top_n_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Stopwords are compared against normalized tokens, so run them through the
/// same normalizer (a configured "It's" becomes "it's").
fn split_words(w: &str) -> Vec<String> {
    normalize(w).words().map(str::to_string).collect()
}

/// Normalize, drop empties, de-duplicate keeping first occurrence.
fn clean_triggers<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for it in items {
        let t = normalize(it).into_string();
        if t.is_empty() {
            continue;
        }
        if seen.insert(t.clone()) {
            out.push(t);
        }
    }
    out
}
