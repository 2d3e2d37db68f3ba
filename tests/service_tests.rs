mod common;

use budget_forecast::{
    core::{
        services::{
            CreditCardService, ForecastService, RecurringService, ServiceError, SettingsService,
            TransactionService,
        },
        time::FixedClock,
    },
    errors::ForecastError,
    ledger::{CreditCardRule, Ledger, RecurringRule, Transaction, TransactionKind},
};
use common::{date, setup_test_env};

fn prepared_ledger(clock: &FixedClock) -> Ledger {
    let mut ledger = Ledger::default();
    SettingsService::set_starting_balance(&mut ledger, 2000.0).unwrap();
    SettingsService::set_current_date(&mut ledger, date(2025, 1, 10));
    SettingsService::quick_select(&mut ledger, 60, date(2025, 1, 10)).unwrap();
    RecurringService::add(
        &mut ledger,
        RecurringRule::new("Salary", 2500.0, TransactionKind::Credit, 25),
        clock,
    )
    .unwrap();
    RecurringService::add(
        &mut ledger,
        RecurringRule::new("Rent", 1200.0, TransactionKind::Debit, 1),
        clock,
    )
    .unwrap();
    ledger
}

#[test]
fn services_feed_the_forecast() {
    let clock = FixedClock::on(date(2025, 1, 10));
    let mut ledger = prepared_ledger(&clock);
    let repair = Transaction::debit("Car repair", 2400.0, date(2025, 1, 20));
    TransactionService::add(&mut ledger, repair, &clock).unwrap();

    let report = ForecastService::run(&ledger, clock.0.date_naive());
    assert_eq!(report.window.forecast_end_date, date(2025, 3, 11));

    // Jan 20 repair, Jan 25 salary, Feb 1 rent, Feb 25 salary, Mar 1 rent.
    let names: Vec<_> = report
        .projection
        .balance_history
        .iter()
        .skip(1)
        .filter_map(|entry| entry.transaction.as_ref())
        .map(|txn| txn.name.as_str())
        .collect();
    assert_eq!(names, vec!["Car repair", "Salary", "Rent", "Salary", "Rent"]);
    assert_eq!(report.summary.lowest_balance, -400.0);
    assert_eq!(report.summary.lowest_balance_date, date(2025, 1, 20));
    assert_eq!(report.summary.current_balance, 2000.0 - 2400.0 + 5000.0 - 2400.0);
}

#[test]
fn recording_a_rule_suppresses_its_generated_twin() {
    let clock = FixedClock::on(date(2025, 1, 10));
    let mut ledger = prepared_ledger(&clock);
    let rent_id = ledger.recurring[1].id.clone();

    RecurringService::use_rule(&mut ledger, &rent_id, date(2025, 2, 1), &clock).unwrap();
    let report = ForecastService::run(&ledger, date(2025, 1, 10));
    let rent_feb: Vec<_> = report
        .transactions
        .iter()
        .filter(|txn| txn.name == "Rent" && txn.date == date(2025, 2, 1))
        .collect();
    assert_eq!(rent_feb.len(), 1);
    assert!(!rent_feb[0].is_recurring);
}

#[test]
fn credit_card_flow_persists_between_runs() {
    let (manager, _config, _data_dir) = setup_test_env();
    let clock = FixedClock::on(date(2025, 1, 10));
    let mut ledger = prepared_ledger(&clock);
    let card_id =
        CreditCardService::add(&mut ledger, CreditCardRule::new("Visa", 31), &clock).unwrap();
    manager.save_all(&ledger).unwrap();

    let window = ledger.settings.resolve(date(2025, 1, 10)).window;
    let mut reloaded = manager.load().unwrap().ledger;
    CreditCardService::record_payment(&mut reloaded, &card_id, 320.0, window, &clock).unwrap();
    CreditCardService::record_payment(&mut reloaded, &card_id, 180.0, window, &clock).unwrap();
    manager.save_transactions(&reloaded).unwrap();

    let ledger = manager.load().unwrap().ledger;
    let paid: Vec<_> = ledger
        .transactions_named("Visa")
        .map(|txn| (txn.date, txn.amount, txn.kind))
        .collect();
    assert_eq!(
        paid,
        vec![
            (date(2025, 1, 31), 320.0, TransactionKind::Debit),
            (date(2025, 2, 28), 180.0, TransactionKind::Debit),
        ]
    );

    // The March slot (Mar 31) lies beyond the Mar 11 window end.
    let err = CreditCardService::record_payment(&mut ledger.clone(), &card_id, 50.0, window, &clock)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forecast(ForecastError::NoUpcomingDate(_))));
}

#[test]
fn unknown_ids() {
    let clock = FixedClock::on(date(2025, 1, 10));
    let mut ledger = prepared_ledger(&clock);

    assert!(!TransactionService::remove(&mut ledger, "missing"));
    assert!(!RecurringService::remove(&mut ledger, "missing"));
    assert!(!CreditCardService::remove(&mut ledger, "missing"));
    let err =
        RecurringService::use_rule(&mut ledger, "missing", date(2025, 1, 10), &clock).unwrap_err();
    assert_eq!(err.to_string(), "Recurring rule not found: missing");
}
