//! Monthly templates: generic recurring rules and credit-card payment slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{decode, transaction::TransactionKind};

/// A fixed monthly obligation or income, expanded automatically into every
/// forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(default, deserialize_with = "decode::amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "decode::day_of_month")]
    pub day_of_month: Option<u32>,
    #[serde(
        default,
        deserialize_with = "decode::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl RecurringRule {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        day_of_month: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount: amount.abs(),
            kind,
            day_of_month: Some(day_of_month),
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A monthly payment slot whose amount is only known when the payment is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardRule {
    #[serde(deserialize_with = "decode::id")]
    pub id: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(default, deserialize_with = "decode::day_of_month")]
    pub day_of_month: Option<u32>,
    #[serde(
        default,
        deserialize_with = "decode::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreditCardRule {
    pub fn new(name: impl Into<String>, day_of_month: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            day_of_month: Some(day_of_month),
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Either kind of monthly template.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Recurring(RecurringRule),
    CreditCard(CreditCardRule),
}

impl Template {
    pub fn id(&self) -> &str {
        match self {
            Template::Recurring(rule) => &rule.id,
            Template::CreditCard(card) => &card.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Template::Recurring(rule) => &rule.name,
            Template::CreditCard(card) => &card.name,
        }
    }

    /// `None` marks an inactive template.
    pub fn day_of_month(&self) -> Option<u32> {
        match self {
            Template::Recurring(rule) => rule.day_of_month,
            Template::CreditCard(card) => card.day_of_month,
        }
    }
}

impl From<RecurringRule> for Template {
    fn from(rule: RecurringRule) -> Self {
        Template::Recurring(rule)
    }
}

impl From<CreditCardRule> for Template {
    fn from(card: CreditCardRule) -> Self {
        Template::CreditCard(card)
    }
}
