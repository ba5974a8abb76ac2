//! CSV loader for raw store exports.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::PipelineError;
use crate::records::RawOrderRow;

/// Columns that must be present for a run to proceed.
pub const REQUIRED_COLUMNS: &[&str] = &["Date", "Category", "Qty", "Amount"];

/// Reads raw order rows from `path`. A `.gz` suffix is decompressed on the
/// fly.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// absent, or the CSV is structurally malformed. Value-level problems are
/// not detected here; cleaning handles those row by row.
pub fn read_records(path: &Path) -> Result<Vec<RawOrderRow>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    read_from(reader, path)
}

/// Reads rows from any reader. Header and field whitespace is trimmed, so a
/// stray `"Channel "` header still binds to its column.
pub fn read_from<R: Read>(reader: R, path: &Path) -> Result<Vec<RawOrderRow>, PipelineError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(PipelineError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RawOrderRow = result.map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Input loaded");
    Ok(rows)
}
