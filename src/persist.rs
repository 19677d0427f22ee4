use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{info, warn};

use crate::{Error, Record, Result};

/// UTF-8 byte order mark, so spreadsheet software picks the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// All collected records flattened into rows.
/// Columns are the union of record fields in the order they were first seen.
#[derive(Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let records: Vec<&Record> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|col| record.get(col).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Encodes the table as BOM-prefixed CSV with a header row.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(UTF8_BOM.to_vec());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Where the output ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveLocation {
    Primary,
    Fallback,
}

impl fmt::Display for SaveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLocation::Primary => f.write_str("primary"),
            SaveLocation::Fallback => f.write_str("fallback"),
        }
    }
}

/// Writes the table to `primary`, or to `fallback` if that fails.
/// Both attempts write the exact same bytes.
pub async fn save(table: &Table, primary: &Path, fallback: &Path) -> Result<(PathBuf, SaveLocation)> {
    let bytes = table.to_csv_bytes()?;

    let primary_err = match write_file(primary, &bytes).await {
        Ok(()) => {
            info!(path = %primary.display(), rows = table.len(), "Wrote the results to file");
            return Ok((primary.to_path_buf(), SaveLocation::Primary));
        }
        Err(e) => e,
    };
    warn!(
        path = %primary.display(),
        error = %primary_err,
        "Couldn't write the results, trying the fallback path: {}",
        fallback.display()
    );

    match write_file(fallback, &bytes).await {
        Ok(()) => {
            info!(path = %fallback.display(), rows = table.len(), "Wrote the results to fallback file");
            Ok((fallback.to_path_buf(), SaveLocation::Fallback))
        }
        Err(fallback_err) => Err(Error::Persist {
            primary: primary.to_path_buf(),
            primary_err: Box::new(primary_err),
            fallback: fallback.to_path_buf(),
            fallback_err: Box::new(fallback_err),
        }),
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}
