use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::Deserializer, Deserialize, Serialize};
use uuid::Uuid;

use super::decode;

/// Direction of a transaction: credits raise the balance, debits lower it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    /// Same-day ordering: incoming funds are applied before outgoing ones.
    pub fn day_order(self) -> u8 {
        match self {
            TransactionKind::Credit => 0,
            TransactionKind::Debit => 1,
        }
    }

    /// Signed effect of `amount` on a running balance.
    pub fn apply(self, balance: f64, amount: f64) -> f64 {
        match self {
            TransactionKind::Credit => balance + amount,
            TransactionKind::Debit => balance - amount,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(TransactionKind::Credit),
            "debit" => Ok(TransactionKind::Debit),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Credit => "credit",
            TransactionKind::Debit => "debit",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        TransactionKind::from_str(&value).map_err(serde::de::Error::custom)
    }
}

/// A dated balance movement, either entered by the user or generated from a
/// recurring rule for the duration of one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(default, deserialize_with = "decode::amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "decode::date")]
    pub date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "decode::flag",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_recurring: bool,
    #[serde(
        default,
        deserialize_with = "decode::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "decode::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Creates a manual transaction with a fresh id.
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount: amount.abs(),
            kind,
            date,
            is_recurring: false,
            recurring_id: None,
            created_at: None,
        }
    }

    pub fn credit(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self::new(name, amount, TransactionKind::Credit, date)
    }

    pub fn debit(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self::new(name, amount, TransactionKind::Debit, date)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> f64 {
        self.kind.apply(0.0, self.amount)
    }

    /// True when this transaction records exactly the given occurrence.
    pub fn matches_occurrence(&self, date: NaiveDate, name: &str, amount: f64) -> bool {
        self.date == date && self.name == name && self.amount == amount
    }
}
