// src/api.rs
//! JSON HTTP surface over the tagger.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::analyze::{top_terms, SentimentDistribution, Tagger};
use crate::ingest::types::RawItem;
use crate::record::TaggedRecord;

/// How many corpus terms `/summary` reports.
const SUMMARY_TOP_TERMS: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub tagger: Arc<Tagger>,
}

impl AppState {
    pub fn new(tagger: Tagger) -> Self {
        Self {
            tagger: Arc::new(tagger),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/tag", post(tag_one))
        .route("/tag/post", post(tag_post))
        .route("/batch", post(tag_batch))
        .route("/summary", post(summary))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn tag_one(State(state): State<AppState>, Json(item): Json<RawItem>) -> Json<TaggedRecord> {
    Json(state.tagger.assemble(&item))
}

#[derive(Deserialize)]
struct PostReq {
    item: RawItem,
    /// Page headings from the caller's scraper, when it got any.
    #[serde(default)]
    headings: Option<Vec<String>>,
}

async fn tag_post(State(state): State<AppState>, Json(body): Json<PostReq>) -> Json<TaggedRecord> {
    Json(
        state
            .tagger
            .assemble_with_headings(&body.item, body.headings.as_deref()),
    )
}

async fn tag_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<RawItem>>,
) -> Result<Json<Vec<TaggedRecord>>, StatusCode> {
    let out = run_batch(&state, items).await?;
    Ok(Json(out))
}

/// Runs the rayon batch off the async executor. A panicked task is a 500,
/// never an empty 200.
async fn run_batch(state: &AppState, items: Vec<RawItem>) -> Result<Vec<TaggedRecord>, StatusCode> {
    let tagger = state.tagger.clone();
    tokio::task::spawn_blocking(move || tagger.assemble_batch(&items))
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "batch tagging task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[derive(Serialize)]
struct SummaryResp {
    records: Vec<TaggedRecord>,
    top_terms: Vec<(String, usize)>,
    distribution: SentimentDistribution,
    sentiment_model: &'static str,
}

async fn summary(
    State(state): State<AppState>,
    Json(items): Json<Vec<RawItem>>,
) -> Result<Json<SummaryResp>, StatusCode> {
    let records = run_batch(&state, items).await?;
    let top = top_terms(&records, &state.tagger.config().stopwords, SUMMARY_TOP_TERMS);
    let distribution = SentimentDistribution::from_records(&records);
    Ok(Json(SummaryResp {
        records,
        top_terms: top,
        distribution,
        sentiment_model: state.tagger.sentiment().model_name(),
    }))
}
