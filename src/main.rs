use chrono::Local;
use lotto_stores::{info_time, process::run, telemetry::init_telemetry, CollectorConfig, HttpFetcher, Outcome, Result};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry();
    let start_time = Local::now();

    let config = CollectorConfig::default();
    let fetcher = HttpFetcher::new(&config)?;

    let summary = match run(&fetcher, &config, shutdown_signal()).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Couldn't save the collected stores");
            return Err(e);
        }
    };

    let report = &summary.report;
    if report.interrupted {
        warn!(attempted = report.attempted, "Collection was interrupted before the last round");
    }
    match &summary.outcome {
        Outcome::Saved { .. } => info!(
            skipped = report.skipped.len(),
            "Done: {}",
            summary.outcome
        ),
        Outcome::NoData => warn!(skipped = report.skipped.len(), "Done: {}", summary.outcome),
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}

/// Resolves on Ctrl-C. If the handler can't be installed it never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Couldn't listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
