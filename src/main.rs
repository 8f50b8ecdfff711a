use anyhow::Context;
use cleaner_client::{Cleaner, ClientConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let host = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CLEANER_HOST").ok())
        .context("usage: cleaner-client <host>  (or set CLEANER_HOST)")?;

    let cleaner = Cleaner::new(ClientConfig::new(host)).context("failed to build client")?;
    info!("Cleaner client starting: {}", cleaner.host());

    cleaner.wake().await.context("module did not answer")?;

    let status = cleaner.status();
    let name = status.name().await?;
    let state = status.cleaner_state().await?;
    let charge = status.charge().await?;
    info!("{}: {} ({}% charged)", name, state.describe(), charge);

    cleaner.find_me().await?;

    // Ctrl-C ends the drive early; the stop still goes out
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, stopping");
            ctrl_c.cancel();
        }
    });

    let run = cleaner
        .forward_for_until(Duration::from_secs(3), &cancel)
        .await?;
    info!(
        "Drove forward: {} dispatches in {:?}{}",
        run.dispatches,
        run.elapsed,
        if run.cancelled { " (cancelled)" } else { "" }
    );

    Ok(())
}
