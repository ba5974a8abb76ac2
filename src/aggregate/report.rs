//! End-to-end pipeline: load, clean, aggregate, export.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::aggregate::kpi::summarize;
use crate::aggregate::tables::{
    daily_category_sales, orders_by_channel, revenue_by_age_group, revenue_by_category,
    revenue_by_gender, revenue_by_state, status_breakdown,
};
use crate::clean::clean_rows;
use crate::error::PipelineError;
use crate::output::{write_summary, write_table};
use crate::parser::read_records;

/// Runs the full preparation pipeline: reads the raw export at `input`,
/// cleans it, and writes every dashboard table plus `summary.json` into
/// `out_dir` (created if absent).
pub fn build_report(input: &Path, out_dir: &Path) -> Result<(), PipelineError> {
    let rows = read_records(input)?;
    let (records, clean) = clean_rows(rows);

    info!(
        rows_seen = clean.rows_seen,
        rows_kept = clean.rows_kept,
        rows_skipped = clean.rows_skipped(),
        "Input cleaned"
    );

    fs::create_dir_all(out_dir).map_err(|e| PipelineError::write(out_dir, e))?;

    write_table(&out_dir.join("revenue_by_state.csv"), &revenue_by_state(&records))?;
    write_table(&out_dir.join("revenue_by_gender.csv"), &revenue_by_gender(&records))?;
    write_table(
        &out_dir.join("revenue_by_category.csv"),
        &revenue_by_category(&records),
    )?;
    write_table(&out_dir.join("orders_by_channel.csv"), &orders_by_channel(&records))?;
    write_table(&out_dir.join("status_breakdown.csv"), &status_breakdown(&records))?;
    write_table(
        &out_dir.join("daily_category_sales.csv"),
        &daily_category_sales(&records),
    )?;
    write_table(
        &out_dir.join("revenue_by_age_group.csv"),
        &revenue_by_age_group(&records),
    )?;
    write_summary(&out_dir.join("summary.json"), &summarize(&records, clean))?;

    info!(out_dir = %out_dir.display(), "Dashboard tables written");
    Ok(())
}
