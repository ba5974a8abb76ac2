//! Row-level cleaning: normalization, type coercion, and skip accounting.
//!
//! A row missing any required field (date, category, quantity, amount) is
//! dropped and counted; optional fields degrade to `None` without dropping
//! the row.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use tracing::debug;

use crate::error::SkipReason;
use crate::records::{AgeGroup, Gender, RawOrderRow, SalesRecord};

/// Date formats seen in store exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d-%y", "%m/%d/%Y", "%d-%m-%Y"];

/// Per-run accounting of what cleaning kept and dropped.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CleanReport {
    pub rows_seen: u64,
    pub rows_kept: u64,
    pub skipped_bad_date: u64,
    pub skipped_bad_qty: u64,
    pub skipped_bad_amount: u64,
    pub skipped_missing_category: u64,
}

impl CleanReport {
    pub fn rows_skipped(&self) -> u64 {
        self.rows_seen - self.rows_kept
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::BadDate => self.skipped_bad_date += 1,
            SkipReason::BadQty => self.skipped_bad_qty += 1,
            SkipReason::BadAmount => self.skipped_bad_amount += 1,
            SkipReason::MissingCategory => self.skipped_missing_category += 1,
        }
    }
}

/// Cleans a batch of raw rows. Invalid rows are skipped, never fatal.
pub fn clean_rows(rows: Vec<RawOrderRow>) -> (Vec<SalesRecord>, CleanReport) {
    let mut report = CleanReport::default();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        report.rows_seen += 1;
        match clean_row(row) {
            Ok(record) => {
                report.rows_kept += 1;
                records.push(record);
            }
            Err(reason) => {
                report.record_skip(reason);
                debug!(%reason, "Row skipped");
            }
        }
    }

    (records, report)
}

/// Applies every cleaning rule to one raw row.
pub fn clean_row(row: RawOrderRow) -> Result<SalesRecord, SkipReason> {
    let date = row
        .date
        .as_deref()
        .and_then(parse_date)
        .ok_or(SkipReason::BadDate)?;
    let qty = row
        .qty
        .as_deref()
        .and_then(parse_qty)
        .ok_or(SkipReason::BadQty)?;
    let amount = row
        .amount
        .as_deref()
        .and_then(parse_amount)
        .ok_or(SkipReason::BadAmount)?;
    let category = normalize_text(row.category.as_deref()).ok_or(SkipReason::MissingCategory)?;

    let age = row.age.as_deref().and_then(parse_age);

    Ok(SalesRecord {
        order_id: normalize_text(row.order_id.as_deref()),
        date,
        status: normalize_label(row.status.as_deref()),
        channel: normalize_label(row.channel.as_deref()),
        category,
        qty,
        amount,
        gender: row.gender.as_deref().and_then(Gender::parse),
        age,
        age_group: age.map(AgeGroup::from_age),
        state: normalize_label(row.state.as_deref()),
    })
}

/// Parses a date, trying the known text formats first and falling back to a
/// bare day serial (days since 1970-01-01), which some spreadsheet exports
/// hand over instead of a formatted date.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    let days = raw.parse::<i64>().ok()?;
    let delta = TimeDelta::try_days(days)?;
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(delta)
}

/// Parses a quantity. Spelled-out words map to their numerals; anything else
/// must be a positive whole number.
pub(crate) fn parse_qty(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    match raw.to_lowercase().as_str() {
        "one" => return Some(1),
        "two" => return Some(2),
        "three" => return Some(3),
        _ => {}
    }

    let n = raw.parse::<f64>().ok()?;
    if !n.is_finite() || n <= 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
        return None;
    }
    Some(n as u32)
}

/// Parses a row amount, tolerating thousands separators. Negative or
/// non-finite amounts are rejected.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    let amount = cleaned.parse::<f64>().ok()?;
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

/// Parses an age, accepting float-typed exports ("45.0").
pub(crate) fn parse_age(raw: &str) -> Option<u32> {
    let age = raw.trim().parse::<f64>().ok()?;
    (age.is_finite() && age >= 0.0 && age <= u32::MAX as f64).then_some(age as u32)
}

/// Trims a free-form text field; empty becomes `None`.
fn normalize_text(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trims and title-cases a label field ("amazon in" -> "Amazon In") so case
/// variants land in the same group; empty becomes `None`.
fn normalize_label(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    (!trimmed.is_empty()).then(|| title_case(trimmed))
}

fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
