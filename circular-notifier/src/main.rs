use anyhow::Context;
use circular_notifier::{AppConfig, CircularPipeline, Settings};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::parse();
    let config = AppConfig::from_env(settings)
        .context("refusing to start with incomplete configuration")?;

    info!("Starting circular notifier for {}", config.feed_url);
    info!("Watermark file: {}", config.state_file.display());

    let mut pipeline = CircularPipeline::from_config(&config)?;

    // A watermark I/O error ends the process; anyhow reports it once on exit
    let report = pipeline.run().await.context("run aborted")?;
    info!(
        "Run finished ({:?}, {:?}): {} circular(s) sent",
        report.outcome,
        report.state,
        report.processed_count()
    );

    Ok(())
}
