//! Collects the winning store locations of every lotto draw in a range
//! and writes them to a single CSV file.

pub mod config;
mod error;
mod macros;
pub mod parse;
pub mod persist;
pub mod process;
pub mod request;
pub mod telemetry;

pub use config::CollectorConfig;
pub use error::{Error, Result};
pub use process::{collect_rounds, run, Outcome, RunSummary};
pub use request::{HttpFetcher, RoundFetcher};

/// A single store entry as returned by the remote source, plus the injected round field.
pub type Record = serde_json::Map<String, serde_json::Value>;

const START_ROUND: u32 = 262;
const END_ROUND: u32 = 1208;
const FILE_PATH: &str = "lotto_stores_final.csv";
/// Written to the current working directory if `FILE_PATH` can't be written.
const FALLBACK_FILE_PATH: &str = "lotto_stores_fallback.csv";
const REQUEST_DELAY_SECS: f64 = 1.0;
const REQUEST_TIMEOUT_SECS: u64 = 10;
const STORES_URL: &str = "https://www.dhlottery.co.kr/wnprchsplcsrch/selectLtWnShp.do";
const RANK_FILTER: &str = "all";
const ROUND_FIELD: &str = "round";
