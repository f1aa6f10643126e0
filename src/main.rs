//! EV Sentiment Explorer: binary entrypoint.
//! Boots the Axum HTTP server with the in-memory document store, the keyword
//! lexicon and the Prometheus `/metrics` route.

use std::sync::Arc;

use ev_sentiment_explorer::{api, metrics::Metrics, AppConfig, AppState, InMemoryDocuments};
use shuttle_axum::ShuttleAxum;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs for local runs: needs `EV_DEV_LOG=1` and a dev environment
/// (debug build, or `SHUTTLE_ENV` of local/development/dev).
fn enable_dev_tracing() {
    let wanted = std::env::var("EV_DEV_LOG").is_ok_and(|v| v.trim() == "1");

    let dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(wanted && dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ingest=info,api=info,lexicon=info,warn"));

    // Shuttle may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let config = AppConfig::from_env();
    let lexicon = config.load_lexicon()?;
    info!(
        target: "lexicon",
        path = %config.lexicon_path.display(),
        chunk = config.upload_chunk_size,
        buckets = config.trend_buckets,
        "configuration loaded"
    );

    let metrics = Metrics::init()?;

    let state = AppState::new(Arc::new(InMemoryDocuments::new()), lexicon, config);
    let router = api::create_router(state).merge(metrics.router());

    Ok(router.into())
}
