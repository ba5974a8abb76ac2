//! Headline KPI computation for the dashboard summary.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::aggregate::types::DashboardSummary;
use crate::clean::CleanReport;
use crate::records::SalesRecord;

/// Reduces the cleaned record set to the headline numbers the dashboard
/// surfaces, bundled with the run's cleaning accounting.
pub fn summarize(records: &[SalesRecord], clean: CleanReport) -> DashboardSummary {
    let total_sales: f64 = records.iter().map(|r| r.amount).sum();
    let total_orders = records.len() as u64;
    let total_units: u64 = records.iter().map(|r| r.qty as u64).sum();
    let dates: BTreeSet<_> = records.iter().map(|r| r.date).collect();

    DashboardSummary {
        schema_version: 1,
        generated_at: Utc::now(),
        total_sales,
        total_orders,
        total_units,
        avg_order_value: if total_orders == 0 {
            0.0
        } else {
            total_sales / total_orders as f64
        },
        distinct_dates: dates.len() as u64,
        first_date: dates.first().copied(),
        last_date: dates.last().copied(),
        clean,
    }
}
