use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row exactly as it appears in the store export. Every field is optional
/// text; nothing is trusted until cleaning.
///
/// Extra export columns (SKU, size, currency, postal code, ...) are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawOrderRow {
    #[serde(rename = "Order ID", default)]
    pub order_id: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    #[serde(rename = "Channel", default)]
    pub channel: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Qty", default)]
    pub qty: Option<String>,
    #[serde(rename = "Amount", default)]
    pub amount: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Age", default)]
    pub age: Option<String>,
    #[serde(rename = "ship-state", default)]
    pub state: Option<String>,
}

/// Customer gender after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Normalizes the free-form export values ("W", "men", "FEMALE", ...).
    ///
    /// Returns `None` for anything outside the known spellings.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "women" | "w" | "female" => Some(Gender::Female),
            "men" | "m" | "male" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

/// Age bucket used by the dashboard's demographic charts.
///
/// | Age range | Group    |
/// |-----------|----------|
/// | 3–18      | Teenager |
/// | 19–64     | Adult    |
/// | >= 65     | Senior   |
/// | otherwise | Other    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AgeGroup {
    Teenager,
    Adult,
    Senior,
    Other,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            3..=18 => AgeGroup::Teenager,
            19..=64 => AgeGroup::Adult,
            65.. => AgeGroup::Senior,
            _ => AgeGroup::Other,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeGroup::Teenager => "Teenager",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
            AgeGroup::Other => "Other",
        };
        write!(f, "{label}")
    }
}

/// A cleaned, typed sales row. Only rows that pass every required-field rule
/// become records; everything downstream operates on these.
#[derive(Debug, Clone, Serialize)]
pub struct SalesRecord {
    pub order_id: Option<String>,
    pub date: NaiveDate,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub category: String,
    pub qty: u32,
    pub amount: f64,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub age_group: Option<AgeGroup>,
    pub state: Option<String>,
}
