//! social-tagger HTTP service.
//! Boots the Axum server with the tagging routes and `/metrics`.

use anyhow::Context;
use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    social_tagger::init_tracing();

    let app = social_tagger::app()?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "social-tagger listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
