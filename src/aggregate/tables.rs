//! Grouping and reduction over cleaned records.
//!
//! Every table is built from an ordered map so identical input always
//! produces identical output row order. Records missing an optional
//! dimension are left out of that table only.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregate::types::{
    AgeGroupRow, CategoryRevenueRow, ChannelOrdersRow, DailyCategoryRow, GenderRevenueRow,
    StateRevenueRow, StatusRow,
};
use crate::aggregate::utility::{mean, share_pct, stddev};
use crate::records::{AgeGroup, Gender, SalesRecord};

/// How many states the dashboard's regional chart shows.
const TOP_STATES: usize = 10;

/// Top states by total revenue, descending, ties broken by state name.
pub fn revenue_by_state(records: &[SalesRecord]) -> Vec<StateRevenueRow> {
    let mut groups: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for record in records {
        if let Some(state) = record.state.as_deref() {
            let entry = groups.entry(state).or_default();
            entry.0 += record.amount;
            entry.1 += 1;
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|(state, (total_sales, orders))| StateRevenueRow {
            state: state.to_string(),
            total_sales,
            orders,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then_with(|| a.state.cmp(&b.state))
    });
    rows.truncate(TOP_STATES);
    rows
}

/// Revenue split by gender with share-of-revenue percentages.
pub fn revenue_by_gender(records: &[SalesRecord]) -> Vec<GenderRevenueRow> {
    let mut groups: BTreeMap<Gender, f64> = BTreeMap::new();
    for record in records {
        if let Some(gender) = record.gender {
            *groups.entry(gender).or_default() += record.amount;
        }
    }

    let total: f64 = groups.values().sum();
    groups
        .into_iter()
        .map(|(gender, total_sales)| GenderRevenueRow {
            gender,
            total_sales,
            share_pct: share_pct(total_sales, total),
        })
        .collect()
}

/// Per-category totals with amount dispersion, sorted by revenue descending.
pub fn revenue_by_category(records: &[SalesRecord]) -> Vec<CategoryRevenueRow> {
    let mut groups: BTreeMap<&str, (Vec<f64>, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.category.as_str()).or_default();
        entry.0.push(record.amount);
        entry.1 += record.qty as u64;
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|(category, (amounts, total_qty))| {
            let avg = mean(&amounts);
            CategoryRevenueRow {
                category: category.to_string(),
                orders: amounts.len() as u64,
                total_qty,
                total_sales: amounts.iter().sum(),
                avg_amount: avg,
                stddev_amount: stddev(&amounts, avg),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_sales
            .total_cmp(&a.total_sales)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}

/// Order volume per sales channel, descending, ties broken by channel name.
pub fn orders_by_channel(records: &[SalesRecord]) -> Vec<ChannelOrdersRow> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(channel) = record.channel.as_deref() {
            *groups.entry(channel).or_default() += 1;
        }
    }

    let mut rows: Vec<_> = groups
        .into_iter()
        .map(|(channel, orders)| ChannelOrdersRow {
            channel: channel.to_string(),
            orders,
        })
        .collect();
    rows.sort_by(|a, b| b.orders.cmp(&a.orders).then_with(|| a.channel.cmp(&b.channel)));
    rows
}

/// Order count and share per fulfillment status.
pub fn status_breakdown(records: &[SalesRecord]) -> Vec<StatusRow> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        if let Some(status) = record.status.as_deref() {
            *groups.entry(status).or_default() += 1;
        }
    }

    let total: u64 = groups.values().sum();
    groups
        .into_iter()
        .map(|(status, orders)| StatusRow {
            status: status.to_string(),
            orders,
            share_pct: share_pct(orders as f64, total as f64),
        })
        .collect()
}

/// Units and revenue per (date, category), sorted by date then category.
pub fn daily_category_sales(records: &[SalesRecord]) -> Vec<DailyCategoryRow> {
    let mut groups: BTreeMap<(NaiveDate, &str), (u64, f64)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((record.date, record.category.as_str()))
            .or_default();
        entry.0 += record.qty as u64;
        entry.1 += record.amount;
    }

    groups
        .into_iter()
        .map(|((date, category), (total_qty, total_sales))| DailyCategoryRow {
            date,
            category: category.to_string(),
            total_qty,
            total_sales,
        })
        .collect()
}

/// Orders and revenue per age bucket.
pub fn revenue_by_age_group(records: &[SalesRecord]) -> Vec<AgeGroupRow> {
    let mut groups: BTreeMap<AgeGroup, (u64, f64)> = BTreeMap::new();
    for record in records {
        if let Some(age_group) = record.age_group {
            let entry = groups.entry(age_group).or_default();
            entry.0 += 1;
            entry.1 += record.amount;
        }
    }

    groups
        .into_iter()
        .map(|(age_group, (orders, total_sales))| AgeGroupRow {
            age_group,
            orders,
            total_sales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: &str, qty: u32, amount: f64) -> SalesRecord {
        SalesRecord {
            order_id: None,
            date: date.parse().unwrap(),
            status: Some("Delivered".to_string()),
            channel: Some("Amazon".to_string()),
            category: category.to_string(),
            qty,
            amount,
            gender: Some(Gender::Female),
            age: Some(30),
            age_group: Some(AgeGroup::Adult),
            state: Some("Maharashtra".to_string()),
        }
    }

    #[test]
    fn test_daily_category_sales_sums_groups() {
        let records = vec![
            record("2024-01-01", "A", 2, 20.0),
            record("2024-01-01", "A", 3, 30.0),
        ];

        let rows = daily_category_sales(&records);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2024-01-01".parse::<NaiveDate>().unwrap());
        assert_eq!(rows[0].category, "A");
        assert_eq!(rows[0].total_qty, 5);
        assert_eq!(rows[0].total_sales, 50.0);
    }

    #[test]
    fn test_daily_category_sales_ordering() {
        let records = vec![
            record("2024-01-02", "B", 1, 10.0),
            record("2024-01-01", "B", 1, 10.0),
            record("2024-01-01", "A", 1, 10.0),
        ];

        let rows = daily_category_sales(&records);
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.date.to_string(), r.category.clone()))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("2024-01-01".to_string(), "A".to_string()),
                ("2024-01-01".to_string(), "B".to_string()),
                ("2024-01-02".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input_produces_empty_tables() {
        let records: Vec<SalesRecord> = vec![];

        assert!(revenue_by_state(&records).is_empty());
        assert!(revenue_by_gender(&records).is_empty());
        assert!(revenue_by_category(&records).is_empty());
        assert!(orders_by_channel(&records).is_empty());
        assert!(status_breakdown(&records).is_empty());
        assert!(daily_category_sales(&records).is_empty());
        assert!(revenue_by_age_group(&records).is_empty());
    }

    #[test]
    fn test_revenue_by_state_top_n_and_ordering() {
        let mut records = Vec::new();
        for i in 0..12 {
            let mut r = record("2024-01-01", "A", 1, (i + 1) as f64 * 100.0);
            r.state = Some(format!("State{i:02}"));
            records.push(r);
        }

        let rows = revenue_by_state(&records);

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].state, "State11");
        assert_eq!(rows[0].total_sales, 1200.0);
        // The two lowest-revenue states fall off the chart.
        assert!(!rows.iter().any(|r| r.state == "State00"));
        assert!(!rows.iter().any(|r| r.state == "State01"));
    }

    #[test]
    fn test_revenue_by_state_skips_missing_state() {
        let mut no_state = record("2024-01-01", "A", 1, 50.0);
        no_state.state = None;
        let records = vec![record("2024-01-01", "A", 1, 100.0), no_state];

        let rows = revenue_by_state(&records);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sales, 100.0);
    }

    #[test]
    fn test_revenue_by_gender_shares_sum_to_100() {
        let mut male = record("2024-01-01", "A", 1, 300.0);
        male.gender = Some(Gender::Male);
        let records = vec![record("2024-01-01", "A", 1, 100.0), male];

        let rows = revenue_by_gender(&records);

        assert_eq!(rows.len(), 2);
        let share_total: f64 = rows.iter().map(|r| r.share_pct).sum();
        assert!((share_total - 100.0).abs() < 1e-9);
        let female = rows.iter().find(|r| r.gender == Gender::Female).unwrap();
        assert_eq!(female.share_pct, 25.0);
    }

    #[test]
    fn test_revenue_by_category_cross_check() {
        let records = vec![
            record("2024-01-01", "Kurta", 2, 700.0),
            record("2024-01-02", "Kurta", 1, 300.0),
            record("2024-01-01", "Set", 1, 1200.0),
        ];

        let rows = revenue_by_category(&records);

        // Brute-force recomputation per group must match the table.
        for row in &rows {
            let group: Vec<_> = records
                .iter()
                .filter(|r| r.category == row.category)
                .collect();
            let expected_sales: f64 = group.iter().map(|r| r.amount).sum();
            let expected_qty: u64 = group.iter().map(|r| r.qty as u64).sum();
            assert_eq!(row.total_sales, expected_sales);
            assert_eq!(row.total_qty, expected_qty);
            assert_eq!(row.orders, group.len() as u64);
        }

        // Sorted by revenue descending.
        assert_eq!(rows[0].category, "Set");
        assert_eq!(rows[1].category, "Kurta");
        assert_eq!(rows[1].avg_amount, 500.0);
    }

    #[test]
    fn test_orders_by_channel_tie_broken_by_name() {
        let mut myntra = record("2024-01-01", "A", 1, 100.0);
        myntra.channel = Some("Myntra".to_string());
        let records = vec![record("2024-01-01", "A", 1, 100.0), myntra];

        let rows = orders_by_channel(&records);

        assert_eq!(rows[0].channel, "Amazon");
        assert_eq!(rows[1].channel, "Myntra");
    }

    #[test]
    fn test_status_breakdown_counts() {
        let mut cancelled = record("2024-01-01", "A", 1, 100.0);
        cancelled.status = Some("Cancelled".to_string());
        let records = vec![
            record("2024-01-01", "A", 1, 100.0),
            record("2024-01-02", "A", 1, 100.0),
            cancelled,
        ];

        let rows = status_breakdown(&records);

        let delivered = rows.iter().find(|r| r.status == "Delivered").unwrap();
        assert_eq!(delivered.orders, 2);
        assert!((delivered.share_pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_by_age_group_ordering() {
        let mut teen = record("2024-01-01", "A", 1, 100.0);
        teen.age_group = Some(AgeGroup::Teenager);
        let mut senior = record("2024-01-01", "A", 1, 100.0);
        senior.age_group = Some(AgeGroup::Senior);
        let records = vec![senior, record("2024-01-01", "A", 1, 100.0), teen];

        let rows = revenue_by_age_group(&records);
        let groups: Vec<_> = rows.iter().map(|r| r.age_group).collect();

        assert_eq!(groups, vec![AgeGroup::Teenager, AgeGroup::Adult, AgeGroup::Senior]);
    }
}
