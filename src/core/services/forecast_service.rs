//! Glue between the stored ledger and the pure forecast engine.

use chrono::NaiveDate;
use serde::Serialize;

use crate::forecast::{
    self, next_credit_card_occurrence, ForecastInput, ForecastSummary, Projection,
};
use crate::ledger::{
    settings::DEFAULT_HORIZON_DAYS, CreditCardRule, ForecastWindow, Ledger, ResolvedSettings,
    Template, Transaction,
};

/// Everything a caller needs to render one forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub settings: ResolvedSettings,
    pub window: ForecastWindow,
    pub transactions: Vec<Transaction>,
    pub projection: Projection,
    pub summary: ForecastSummary,
}

/// A credit card and its next unpaid slot inside the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutlook {
    pub card: CreditCardRule,
    pub next_date: Option<NaiveDate>,
}

pub struct ForecastService;

impl ForecastService {
    pub fn run(ledger: &Ledger, today: NaiveDate) -> ForecastReport {
        Self::run_with_horizon(ledger, today, DEFAULT_HORIZON_DAYS)
    }

    /// Like [`ForecastService::run`], with `horizon_days` standing in for a
    /// missing end date.
    pub fn run_with_horizon(
        ledger: &Ledger,
        today: NaiveDate,
        horizon_days: i64,
    ) -> ForecastReport {
        let settings = ledger.settings.resolve_with_horizon(today, horizon_days);
        let templates: Vec<Template> = ledger
            .recurring
            .iter()
            .cloned()
            .map(Template::from)
            .collect();

        let result = forecast::run(ForecastInput {
            starting_balance: settings.starting_balance,
            manual: &ledger.transactions,
            templates: &templates,
            window: settings.window,
        });
        tracing::debug!(
            transactions = result.transactions.len(),
            balance = result.summary.current_balance,
            "forecast computed"
        );

        ForecastReport {
            settings,
            window: result.window,
            transactions: result.transactions,
            projection: result.projection,
            summary: result.summary,
        }
    }

    pub fn credit_card_outlook(ledger: &Ledger, window: ForecastWindow) -> Vec<CardOutlook> {
        ledger
            .credit_cards
            .iter()
            .map(|card| CardOutlook {
                card: card.clone(),
                next_date: next_credit_card_occurrence(card, &ledger.transactions, window),
            })
            .collect()
    }
}
