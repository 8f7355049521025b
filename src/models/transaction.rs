use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as returned by the store. `amount` is always positive;
/// direction comes from `transaction_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(with = "store_date")]
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// What the user fills in to record a transaction. The owning account and
/// the timestamp are added by the data-access layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: Category,
    pub description: String,
}

impl NewTransaction {
    pub fn new(
        amount: Decimal,
        transaction_type: TransactionType,
        category: Category,
        description: String,
    ) -> anyhow::Result<Self> {
        if amount <= Decimal::ZERO {
            anyhow::bail!("Amount must be greater than zero");
        }
        Ok(Self {
            amount,
            transaction_type,
            category,
            description,
        })
    }
}

/// Dates from the store are RFC 3339, but some backends drop the offset.
/// Offset-less values are read as UTC.
pub(crate) mod store_date {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
