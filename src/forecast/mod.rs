//! The forecast engine: template expansion followed by balance projection.
//!
//! Everything in here is a pure function of its inputs. No clock reads, no I/O
//! and no error paths; malformed values degrade to zero or are skipped.

pub mod projection;
pub mod recurring;

use serde::Serialize;

use crate::ledger::{ForecastWindow, Template, Transaction};

pub use projection::{project_balance, BalanceEntry, ForecastSummary, Projection};
pub use recurring::{
    expand_recurring, next_credit_card_occurrence, occurrence_id, recurring_occurrences,
};

/// Inputs of one forecast run.
#[derive(Debug, Clone, Copy)]
pub struct ForecastInput<'a> {
    pub starting_balance: f64,
    pub manual: &'a [Transaction],
    pub templates: &'a [Template],
    pub window: ForecastWindow,
}

/// Output of one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub window: ForecastWindow,
    /// Manual transactions plus generated occurrences, in input order.
    pub transactions: Vec<Transaction>,
    pub projection: Projection,
    pub summary: ForecastSummary,
}

/// Expands `input.templates` over the window and projects the balance up to the
/// window's end date.
pub fn run(input: ForecastInput<'_>) -> Forecast {
    let transactions = expand_recurring(input.manual, input.templates, input.window);
    let projection = project_balance(
        input.starting_balance,
        &transactions,
        input.window.current_date,
        Some(input.window.forecast_end_date),
    );
    let summary = ForecastSummary::from_projection(input.starting_balance, &projection);
    Forecast {
        window: input.window,
        transactions,
        projection,
        summary,
    }
}
