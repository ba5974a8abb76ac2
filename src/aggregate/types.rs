//! Row types for the exported aggregate tables.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::clean::CleanReport;
use crate::records::{AgeGroup, Gender};

/// Revenue and order total for one destination state.
#[derive(Debug, Clone, Serialize)]
pub struct StateRevenueRow {
    pub state: String,
    pub total_sales: f64,
    pub orders: u64,
}

/// Revenue total and share for one gender.
#[derive(Debug, Clone, Serialize)]
pub struct GenderRevenueRow {
    pub gender: Gender,
    pub total_sales: f64,
    pub share_pct: f64,
}

/// Per-category order, unit, and revenue totals with amount dispersion.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRevenueRow {
    pub category: String,
    pub orders: u64,
    pub total_qty: u64,
    pub total_sales: f64,
    pub avg_amount: f64,
    pub stddev_amount: f64,
}

/// Order volume for one sales channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelOrdersRow {
    pub channel: String,
    pub orders: u64,
}

/// Order count and share for one fulfillment status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub status: String,
    pub orders: u64,
    pub share_pct: f64,
}

/// One (date, category) bucket: the trend table behind the dashboard's daily
/// sales chart.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCategoryRow {
    pub date: NaiveDate,
    pub category: String,
    pub total_qty: u64,
    pub total_sales: f64,
}

/// Orders and revenue for one age bucket.
#[derive(Debug, Clone, Serialize)]
pub struct AgeGroupRow {
    pub age_group: AgeGroup,
    pub orders: u64,
    pub total_sales: f64,
}

/// Headline KPIs plus run accounting, written as `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub total_sales: f64,
    pub total_orders: u64,
    pub total_units: u64,
    pub avg_order_value: f64,
    pub distinct_dates: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub clean: CleanReport,
}
