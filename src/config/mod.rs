// src/config/mod.rs
pub mod tagger;

pub use tagger::{
    SentimentSection, TaggerConfig, DEFAULT_COMMENT_TOP_N, DEFAULT_TAGGER_CONFIG_PATH,
    DEFAULT_TOP_N, ENV_TAGGER_CONFIG_PATH, ENV_TAGGER_TOP_N,
};
