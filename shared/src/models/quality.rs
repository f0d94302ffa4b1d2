//! Quality control models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Laboratory check of a seed lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityCheck {
    pub id: String,
    pub lot_id: String,
    pub check_type: CheckType,
    pub date: NaiveDate,
    /// Germination rate in percent
    pub germination_rate: Decimal,
    /// Specific purity in percent
    pub purity: Decimal,
    /// Moisture content in percent
    pub moisture_content: Decimal,
    /// Weight of 1000 seeds in grams
    pub thousand_seed_weight: Decimal,
    pub result: CheckResult,
}

/// When in the lot's life the check was made
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    #[default]
    BeforePackaging,
    AfterPackaging,
    Periodic,
}

impl std::fmt::Display for CheckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckType::BeforePackaging => write!(f, "Before Packaging"),
            CheckType::AfterPackaging => write!(f, "After Packaging"),
            CheckType::Periodic => write!(f, "Periodic"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckResult {
    #[default]
    Pass,
    Fail,
}

impl std::fmt::Display for CheckResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckResult::Pass => write!(f, "Pass"),
            CheckResult::Fail => write!(f, "Fail"),
        }
    }
}
