//! pagescan - OCR page deduplication for multi-page scans.
//!
//! Recognizes the pages of a scanned document concurrently, drops pages
//! that were captured more than once, and prints the combined text.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "pagescan=info"
    } else {
        "pagescan=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(cli::run());
    // Engine calls abandoned after a page timeout must not hold the process open.
    runtime.shutdown_background();
    result
}
