//! Output formatting and persistence for aggregate tables.
//!
//! Supports CSV table writes, pretty JSON for the KPI summary, and
//! log-friendly JSON printing.

use std::fs::{self, File};
use std::path::Path;

use anyhow::Result;
use csv::Writer;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::PipelineError;

/// Writes `rows` as a CSV table at `path`, replacing any previous run's file.
///
/// Headers are derived from the row type and written once. An empty row set
/// produces an empty file rather than an error.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    debug!(path = %path.display(), rows = rows.len(), "Writing table");

    let file = File::create(path).map_err(|e| PipelineError::write(path, e))?;
    let mut writer = Writer::from_writer(file);

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| PipelineError::write(path, e))?;
    }
    writer.flush().map_err(|e| PipelineError::write(path, e))?;

    Ok(())
}

/// Writes the KPI summary as pretty-printed JSON.
pub fn write_summary<T: Serialize>(path: &Path, summary: &T) -> Result<(), PipelineError> {
    let body = serde_json::to_vec_pretty(summary).map_err(|e| PipelineError::write(path, e))?;
    fs::write(path, body).map_err(|e| PipelineError::write(path, e))?;

    debug!(path = %path.display(), "Summary written");
    Ok(())
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
