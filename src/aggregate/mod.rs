//! Grouped aggregation over cleaned sales records.
//!
//! This module reduces the cleaned record set into the dashboard's aggregate
//! tables and headline KPIs, and writes the results out for the external
//! spreadsheet layer to chart.

pub mod kpi;
pub mod report;
pub mod tables;
pub mod types;
pub mod utility;
