// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod record;
pub mod sentiment;

mod debug;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    extract_keyphrases, match_barriers, match_topics, merge_topics, top_terms,
    SentimentDistribution, Tagger,
};
pub use crate::api::router;
pub use crate::config::TaggerConfig;
pub use crate::ingest::types::{ItemKind, RawItem};
pub use crate::ingest::{normalize, NormalizedText};
pub use crate::record::TaggedRecord;
pub use crate::sentiment::{PolarityModel, SentimentLabel, SentimentScorer};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "social_tagger=info,tagger=info,warn";

/// Install the fmt subscriber for a binary. `LOG_FORMAT=json` switches to
/// JSON lines. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let res = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };
    let _ = res;
}

/// Load configuration (env + files) and build the shared tagger.
pub fn build_tagger() -> anyhow::Result<Tagger> {
    let cfg = TaggerConfig::load()?;
    tracing::info!(
        top_n = cfg.top_n,
        comment_top_n = cfg.comment_top_n,
        topics = cfg.topics.len(),
        barrier_categories = cfg.barriers.len(),
        stopwords = cfg.stopwords.len(),
        "tagger config loaded"
    );
    Ok(Tagger::new(cfg))
}

/// Full HTTP app: tagging routes plus `/metrics`.
pub fn app() -> anyhow::Result<axum::Router> {
    // recorder before the tagger, so start-up gauges are captured
    let metrics = crate::metrics::Metrics::init()?;
    let tagger = build_tagger()?;
    Ok(router(api::AppState::new(tagger)).merge(metrics.router()))
}
