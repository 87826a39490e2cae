// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use social_tagger::metrics::Metrics;
use social_tagger::{api, RawItem, Tagger, TaggerConfig};

#[tokio::test]
async fn metrics_endpoint_contains_tagger_series() {
    let metrics = Metrics::init().expect("install recorder");
    let tagger = Tagger::new(TaggerConfig::default());
    tagger.assemble_batch(&[
        RawItem::comment("a", "wind"),
        RawItem::comment("b", "[removed]"),
    ]);

    let app = api::router(api::AppState::new(tagger)).merge(metrics.router());
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    for needle in [
        "tagger_records_total",
        "tagger_placeholders_skipped_total",
        "tagger_sentiment_degraded",
    ] {
        assert!(text.contains(needle), "missing {needle} in:\n{text}");
    }
}

#[test]
fn init_is_reentrant() {
    assert!(Metrics::init().is_ok());
    assert!(Metrics::init().is_ok());
}
