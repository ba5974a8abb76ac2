//! Typed failures for the preparation pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal pipeline failures. Anything here aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input '{path}' is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("failed to open input '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write output '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PipelineError {
    pub(crate) fn write(
        path: &Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        PipelineError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Why a raw row was dropped during cleaning. Never fatal; each skip is
/// counted in the run's [`CleanReport`](crate::clean::CleanReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing or unparseable date")]
    BadDate,
    #[error("missing, non-numeric, or zero quantity")]
    BadQty,
    #[error("missing or non-numeric amount")]
    BadAmount,
    #[error("missing product category")]
    MissingCategory,
}
