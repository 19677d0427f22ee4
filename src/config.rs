use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    Error, Result, END_ROUND, FALLBACK_FILE_PATH, FILE_PATH, RANK_FILTER, REQUEST_DELAY_SECS,
    REQUEST_TIMEOUT_SECS, ROUND_FIELD, START_ROUND, STORES_URL,
};

/// Everything a collection run needs to know.
/// `Default` uses the crate constants, tests build small ranges directly.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// First round to request, inclusive.
    pub start_round: u32,
    /// Last round to request, inclusive.
    pub end_round: u32,
    /// Pause before every request, in seconds.
    pub request_delay: f64,
    pub request_timeout: Duration,
    pub output_path: PathBuf,
    pub fallback_path: PathBuf,
    pub endpoint: String,
    /// Value of the `srchWnShpRnk` query parameter.
    pub rank_filter: String,
    /// Name of the column that carries the round number in the output.
    pub round_field: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            start_round: START_ROUND,
            end_round: END_ROUND,
            request_delay: REQUEST_DELAY_SECS,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            output_path: PathBuf::from(FILE_PATH),
            fallback_path: PathBuf::from(FALLBACK_FILE_PATH),
            endpoint: STORES_URL.to_string(),
            rank_filter: RANK_FILTER.to_string(),
            round_field: ROUND_FIELD.to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_round == 0 || self.start_round > self.end_round {
            return Err(Error::InvalidRange {
                start: self.start_round,
                end: self.end_round,
            });
        }
        self.delay()?;
        Ok(())
    }

    #[inline]
    pub fn rounds(&self) -> RangeInclusive<u32> {
        self.start_round..=self.end_round
    }

    /// Fails for negative, NaN or infinite delays and for ones too big for a `Duration`.
    #[inline]
    pub fn delay(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.request_delay).map_err(|_| Error::InvalidDelay(self.request_delay))
    }
}
