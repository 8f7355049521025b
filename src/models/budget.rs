use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// 1-12
    pub month: u32,
    pub year: i32,
}

/// Body of `POST /Budget`. The store upserts on (category, month, year).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBudgetRequest {
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
}

impl SetBudgetRequest {
    /// Budget for `category` in the month containing `date`.
    pub fn for_month(
        category: Category,
        amount: Decimal,
        date: impl Datelike,
    ) -> anyhow::Result<Self> {
        if amount <= Decimal::ZERO {
            anyhow::bail!("Budget amount must be greater than zero");
        }
        Ok(Self {
            category,
            amount,
            month: date.month(),
            year: date.year(),
        })
    }
}
