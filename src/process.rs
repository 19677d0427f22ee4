use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::parse::extract_records;
use crate::persist::{save, SaveLocation, Table};
use crate::request::RoundFetcher;
use crate::{CollectorConfig, Error, Record, Result};

/// The records of one round that returned at least one store.
#[derive(Debug)]
pub struct Batch {
    pub round: u32,
    pub records: Vec<Record>,
}

/// Append-only collection of batches, in the order the rounds were requested.
#[derive(Debug, Default)]
pub struct Accumulation {
    batches: Vec<Batch>,
}

impl Accumulation {
    /// Empty batches are dropped.
    pub fn push(&mut self, round: u32, records: Vec<Record>) {
        if !records.is_empty() {
            self.batches.push(Batch { round, records });
        }
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.batches.iter().map(|b| b.records.len()).sum()
    }

    /// Flattens every batch into one table, keeping batch order and source order within a batch.
    pub fn to_table(&self) -> Table {
        Table::from_records(self.batches.iter().flat_map(|b| b.records.iter()))
    }
}

#[derive(Debug)]
pub struct SkippedRound {
    pub round: u32,
    pub reason: String,
}

/// What happened while collecting.
#[derive(Debug, Default)]
pub struct CollectReport {
    pub accumulation: Accumulation,
    pub attempted: u32,
    pub skipped: Vec<SkippedRound>,
    /// Collection stopped early because the interrupt fired.
    pub interrupted: bool,
}

/// How a run ended when it didn't fail outright.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Saved {
        path: PathBuf,
        rows: usize,
        location: SaveLocation,
    },
    NoData,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Saved {
                path,
                rows,
                location,
            } => write!(f, "{rows} rows, path = {location} ({})", path.display()),
            Outcome::NoData => f.write_str("no data collected, nothing written"),
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub report: CollectReport,
    pub outcome: Outcome,
}

/// Collects every round in the configured range and then persists whatever was collected,
/// also when `interrupt` fires halfway through.
/// Only an invalid config or failing to write both output paths is an error.
pub async fn run<F, S>(fetcher: &F, config: &CollectorConfig, interrupt: S) -> Result<RunSummary>
where
    F: RoundFetcher + ?Sized,
    S: Future<Output = ()>,
{
    config.validate()?;
    let report = collect_rounds(fetcher, config, interrupt).await;
    let outcome = finalize(&report.accumulation, config).await?;
    Ok(RunSummary { report, outcome })
}

/// Requests the rounds one after another. A round that fails for any reason is skipped.
/// Stops early if `interrupt` resolves, dropping the request in flight.
pub async fn collect_rounds<F, S>(fetcher: &F, config: &CollectorConfig, interrupt: S) -> CollectReport
where
    F: RoundFetcher + ?Sized,
    S: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    let mut report = CollectReport::default();
    let total = config.rounds().count();
    info!("Started collecting rounds {}..={}", config.start_round, config.end_round);

    for (idx, round) in config.rounds().enumerate() {
        tokio::select! {
            biased;
            _ = &mut interrupt => {
                warn!(round, "Interrupted, saving what was collected so far");
                report.interrupted = true;
                break;
            }
            res = fetch_batch(fetcher, config, round) => {
                report.attempted += 1;
                let progress = format!("{}/{}", idx + 1, total);
                match res {
                    Ok(records) => {
                        info!(round, progress = %progress, records = records.len(), "Collected round");
                        report.accumulation.push(round, records);
                    }
                    Err(e) => {
                        warn!(round, progress = %progress, error = %e, "Skipping round");
                        report.skipped.push(SkippedRound { round, reason: e.to_string() });
                    }
                }
            }
        }
    }

    debug!(
        rows = report.accumulation.row_count(),
        skipped = report.skipped.len(),
        "Finished collecting"
    );
    report
}

async fn fetch_batch<F>(fetcher: &F, config: &CollectorConfig, round: u32) -> Result<Vec<Record>>
where
    F: RoundFetcher + ?Sized,
{
    tokio::time::sleep(config.delay()?).await;

    let body = tokio::time::timeout(config.request_timeout, fetcher.fetch_round(round))
        .await
        .map_err(|_| Error::Timeout(config.request_timeout))??;

    extract_records(body, round, &config.round_field)
}

async fn finalize(accumulation: &Accumulation, config: &CollectorConfig) -> Result<Outcome> {
    if accumulation.is_empty() {
        warn!("No data was collected, nothing to write");
        return Ok(Outcome::NoData);
    }

    let table = accumulation.to_table();
    let (path, location) = save(&table, &config.output_path, &config.fallback_path).await?;
    Ok(Outcome::Saved {
        path,
        rows: table.len(),
        location,
    })
}
