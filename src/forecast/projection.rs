//! Running-balance projection and the figures derived from it.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::Transaction;

/// One point on the balance timeline. `transaction` is `None` only for the seed
/// entry carrying the starting balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub date: NaiveDate,
    pub balance: f64,
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub current_balance: f64,
    pub balance_history: Vec<BalanceEntry>,
}

/// Headline numbers shown next to the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub starting_balance: f64,
    pub current_balance: f64,
    pub net_change: f64,
    pub lowest_balance: f64,
    pub lowest_balance_date: NaiveDate,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Applies `transactions` to `starting_balance` in date order.
///
/// Same-day credits are applied before same-day debits; otherwise the input order
/// is kept. When `up_to` is given, the walk stops at the first transaction dated
/// after it.
pub fn project_balance(
    starting_balance: f64,
    transactions: &[Transaction],
    current_date: NaiveDate,
    up_to: Option<NaiveDate>,
) -> Projection {
    let mut balance = finite_or_zero(starting_balance);

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|txn| (txn.date, txn.kind.day_order()));

    let mut balance_history = Vec::with_capacity(ordered.len() + 1);
    balance_history.push(BalanceEntry {
        date: current_date,
        balance,
        transaction: None,
    });

    for txn in ordered {
        if up_to.is_some_and(|limit| txn.date > limit) {
            break;
        }
        balance = txn.kind.apply(balance, finite_or_zero(txn.amount));
        balance_history.push(BalanceEntry {
            date: txn.date,
            balance,
            transaction: Some(txn.clone()),
        });
    }

    Projection {
        current_balance: balance,
        balance_history,
    }
}

impl ForecastSummary {
    /// Net change and the lowest point of the timeline (seed entry included; the
    /// earliest entry wins a tie).
    pub fn from_projection(starting_balance: f64, projection: &Projection) -> Self {
        let starting_balance = finite_or_zero(starting_balance);
        let mut lowest = (starting_balance, None);
        for entry in &projection.balance_history {
            if lowest.1.is_none() || entry.balance < lowest.0 {
                lowest = (entry.balance, Some(entry.date));
            }
        }
        let (lowest_balance, lowest_date) = lowest;
        let seed_date = projection
            .balance_history
            .first()
            .map(|entry| entry.date)
            .unwrap_or_default();

        ForecastSummary {
            starting_balance,
            current_balance: projection.current_balance,
            net_change: projection.current_balance - starting_balance,
            lowest_balance,
            lowest_balance_date: lowest_date.unwrap_or(seed_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seed_entry_carries_starting_balance() {
        let projection = project_balance(250.0, &[], date(2025, 1, 10), None);

        assert_eq!(projection.current_balance, 250.0);
        assert_eq!(projection.balance_history.len(), 1);
        assert_eq!(projection.balance_history[0].date, date(2025, 1, 10));
        assert!(projection.balance_history[0].transaction.is_none());

        let summary = ForecastSummary::from_projection(250.0, &projection);
        assert_eq!(summary.lowest_balance, 250.0);
        assert_eq!(summary.lowest_balance_date, date(2025, 1, 10));
        assert_eq!(summary.net_change, 0.0);
    }

    #[test]
    fn credits_precede_debits_on_the_same_day() {
        let day = date(2025, 1, 15);
        let transactions = vec![
            Transaction::debit("Bill", 100.0, day),
            Transaction::credit("Pay", 100.0, day),
        ];
        let projection = project_balance(0.0, &transactions, date(2025, 1, 10), None);
        let balances: Vec<f64> = projection
            .balance_history
            .iter()
            .map(|entry| entry.balance)
            .collect();

        assert_eq!(balances, vec![0.0, 100.0, 0.0]);
        assert_eq!(
            projection.balance_history[1].transaction.as_ref().unwrap().name,
            "Pay"
        );
    }

    #[test]
    fn same_day_same_type_keeps_input_order() {
        let day = date(2025, 1, 15);
        let transactions = vec![
            Transaction::debit("first", 1.0, day),
            Transaction::debit("second", 2.0, day),
            Transaction::debit("earlier", 3.0, date(2025, 1, 14)),
        ];
        let projection = project_balance(10.0, &transactions, date(2025, 1, 10), None);
        let names: Vec<&str> = projection
            .balance_history
            .iter()
            .filter_map(|entry| entry.transaction.as_ref())
            .map(|txn| txn.name.as_str())
            .collect();
        assert_eq!(names, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn lowest_balance_and_its_date() {
        let transactions = vec![
            Transaction::credit("Refund", 300.0, date(2025, 1, 5)),
            Transaction::debit("Car", 700.0, date(2025, 1, 2)),
        ];
        let projection = project_balance(500.0, &transactions, date(2025, 1, 1), None);
        let summary = ForecastSummary::from_projection(500.0, &projection);

        assert_eq!(summary.current_balance, 100.0);
        assert_eq!(summary.net_change, -400.0);
        assert_eq!(summary.lowest_balance, -200.0);
        assert_eq!(summary.lowest_balance_date, date(2025, 1, 2));
    }

    #[test]
    fn first_lowest_wins_ties() {
        let transactions = vec![
            Transaction::debit("a", 50.0, date(2025, 1, 2)),
            Transaction::credit("b", 50.0, date(2025, 1, 3)),
            Transaction::debit("c", 50.0, date(2025, 1, 4)),
        ];
        let projection = project_balance(0.0, &transactions, date(2025, 1, 1), None);
        let summary = ForecastSummary::from_projection(0.0, &projection);
        assert_eq!(summary.lowest_balance, -50.0);
        assert_eq!(summary.lowest_balance_date, date(2025, 1, 2));
    }

    #[test]
    fn up_to_excludes_later_transactions() {
        let transactions = vec![
            Transaction::credit("early", 10.0, date(2025, 1, 5)),
            Transaction::credit("edge", 20.0, date(2025, 1, 31)),
            Transaction::credit("late", 40.0, date(2025, 2, 1)),
        ];
        let projection = project_balance(
            0.0,
            &transactions,
            date(2025, 1, 1),
            Some(date(2025, 1, 31)),
        );
        assert_eq!(projection.current_balance, 30.0);
        assert_eq!(projection.balance_history.len(), 3);
    }

    #[test]
    fn non_finite_inputs_degrade_to_zero() {
        let mut odd = Transaction::debit("odd", 0.0, date(2025, 1, 2));
        odd.amount = f64::NAN;
        let projection = project_balance(f64::NAN, &[odd], date(2025, 1, 1), None);
        assert_eq!(projection.current_balance, 0.0);
        assert_eq!(projection.balance_history[0].balance, 0.0);
    }
}
