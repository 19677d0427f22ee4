use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid round range {start}..={end}, rounds start at 1 and start can't exceed end.")]
    InvalidRange { start: u32, end: u32 },
    #[error("Invalid request delay: {0} sec")]
    InvalidDelay(f64),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Response body is not a JSON object")]
    MalformedResponse,
    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
    #[error("Entry {index} of `data.list` is not an object")]
    MalformedRecord { index: usize },

    #[error(
        "Couldn't write to {} ({primary_err}) nor to the fallback {} ({fallback_err})",
        .primary.display(),
        .fallback.display()
    )]
    Persist {
        primary: PathBuf,
        primary_err: Box<Error>,
        fallback: PathBuf,
        fallback_err: Box<Error>,
    },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
