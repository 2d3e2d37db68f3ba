//! Expansion of monthly templates into dated occurrences.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::debug;

use crate::ledger::{
    calendar::{clamp_day, month_span, shift_month},
    CreditCardRule, ForecastWindow, RecurringRule, Template, Transaction,
};

/// The credit-card search always looks at least this many months ahead.
const MIN_SEARCH_MONTHS: i32 = 12;

/// Stable id for the occurrence of `template_id` on `date`: the template id plus
/// the date's midnight as milliseconds since the epoch.
pub fn occurrence_id(template_id: &str, date: NaiveDate) -> String {
    let millis = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    format!("recurring-{template_id}-{millis}")
}

/// Returns the manual transactions followed by every recurring occurrence that
/// falls inside `window` and is not already recorded manually.
pub fn expand_recurring(
    manual: &[Transaction],
    templates: &[Template],
    window: ForecastWindow,
) -> Vec<Transaction> {
    let mut all = manual.to_vec();
    all.extend(recurring_occurrences(manual, templates, window));
    all
}

/// Generated occurrences only. Credit-card templates never contribute here; their
/// payments are proposed one at a time by [`next_credit_card_occurrence`].
pub fn recurring_occurrences(
    manual: &[Transaction],
    templates: &[Template],
    window: ForecastWindow,
) -> Vec<Transaction> {
    if window.is_degenerate() {
        debug!(
            current = %window.current_date,
            end = %window.forecast_end_date,
            "forecast window is empty"
        );
        return Vec::new();
    }

    let mut generated = Vec::new();
    for template in templates {
        match template {
            Template::Recurring(rule) => expand_rule(rule, manual, window, &mut generated),
            Template::CreditCard(card) => {
                debug!(card = %card.id, "credit-card template expands on demand only");
            }
        }
    }
    generated
}

fn expand_rule(
    rule: &RecurringRule,
    manual: &[Transaction],
    window: ForecastWindow,
    out: &mut Vec<Transaction>,
) {
    let Some(day) = rule.day_of_month else {
        debug!(rule = %rule.id, "skipping recurring rule without a day of month");
        return;
    };

    for date in monthly_dates(window.current_date, window.forecast_end_date, day) {
        if !window.contains(date) {
            continue;
        }
        if manual
            .iter()
            .any(|txn| txn.matches_occurrence(date, &rule.name, rule.amount))
        {
            debug!(rule = %rule.id, %date, "occurrence already recorded manually");
            continue;
        }
        out.push(Transaction {
            id: occurrence_id(&rule.id, date),
            name: rule.name.clone(),
            amount: rule.amount,
            kind: rule.kind,
            date,
            is_recurring: true,
            recurring_id: Some(rule.id.clone()),
            created_at: None,
        });
    }
}

/// One clamped date per calendar month, from the month of `from` through the
/// month of `to`.
fn monthly_dates(from: NaiveDate, to: NaiveDate, day: u32) -> impl Iterator<Item = NaiveDate> {
    let months = month_span(from, to).max(-1) + 1;
    let (year, month) = (from.year(), from.month());
    (0..months).filter_map(move |offset| {
        let (y, m) = shift_month(year, month, offset);
        clamp_day(y, m, day)
    })
}

/// Proposes the next payment date for a credit card.
///
/// The search starts in the month after the most recent payment recorded under the
/// card's name (or in the current month when there is none) and returns the first
/// clamped slot that is after the current date, not already paid and not past the
/// end of the window. `None` means there is nothing to pay inside the window.
pub fn next_credit_card_occurrence(
    card: &CreditCardRule,
    existing: &[Transaction],
    window: ForecastWindow,
) -> Option<NaiveDate> {
    let day = card.day_of_month?;

    let mut paid: Vec<NaiveDate> = existing
        .iter()
        .filter(|txn| txn.name == card.name)
        .map(|txn| txn.date)
        .collect();
    paid.sort_unstable_by(|a, b| b.cmp(a));

    let (year, month) = match paid.first() {
        Some(latest) => shift_month(latest.year(), latest.month(), 1),
        None => (window.current_date.year(), window.current_date.month()),
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let bound = MIN_SEARCH_MONTHS.max(month_span(start, window.forecast_end_date) + 1);

    let next = (0..bound)
        .filter_map(|offset| {
            let (y, m) = shift_month(year, month, offset);
            clamp_day(y, m, day)
        })
        .take_while(|candidate| *candidate <= window.forecast_end_date)
        .find(|candidate| *candidate > window.current_date && !paid.contains(candidate));

    if next.is_none() {
        debug!(card = %card.id, "no upcoming credit-card slot inside the window");
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(current: NaiveDate, end: NaiveDate) -> ForecastWindow {
        ForecastWindow::new(current, end)
    }

    fn rent() -> Template {
        RecurringRule::new("Rent", 1200.0, TransactionKind::Debit, 1)
            .with_id("rent")
            .into()
    }

    #[test]
    fn occurrence_id_is_epoch_millis_of_the_date() {
        assert_eq!(
            occurrence_id("rent", date(2025, 2, 1)),
            "recurring-rent-1738368000000"
        );
        assert_eq!(occurrence_id("x", date(1970, 1, 1)), "recurring-x-0");
    }

    #[test]
    fn expands_months_inside_the_window_only() {
        let generated = recurring_occurrences(
            &[],
            &[rent()],
            window(date(2025, 1, 10), date(2025, 3, 31)),
        );
        let dates: Vec<_> = generated.iter().map(|txn| txn.date).collect();
        assert_eq!(dates, vec![date(2025, 2, 1), date(2025, 3, 1)]);
        assert!(generated.iter().all(|txn| txn.is_recurring));
        assert!(generated
            .iter()
            .all(|txn| txn.recurring_id.as_deref() == Some("rent")));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let generated = recurring_occurrences(
            &[],
            &[rent()],
            window(date(2025, 1, 1), date(2025, 2, 1)),
        );
        let dates: Vec<_> = generated.iter().map(|txn| txn.date).collect();
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 2, 1)]);
    }

    #[test]
    fn day_31_is_clamped_in_short_months() {
        let rule: Template = RecurringRule::new("Card", 50.0, TransactionKind::Debit, 31)
            .with_id("eom")
            .into();
        let generated = recurring_occurrences(
            &[],
            &[rule],
            window(date(2024, 1, 1), date(2024, 12, 31)),
        );
        let days: Vec<u32> = generated.iter().map(|txn| txn.date.day()).collect();
        assert_eq!(days, vec![31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn manual_copy_of_an_occurrence_suppresses_it() {
        let manual = vec![Transaction::debit("Rent", 1200.0, date(2025, 2, 1)).with_id("m1")];
        let all = expand_recurring(
            &manual,
            &[rent()],
            window(date(2025, 1, 10), date(2025, 3, 31)),
        );

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "m1");
        assert_eq!(all[1].date, date(2025, 3, 1));
    }

    #[test]
    fn near_miss_manual_entry_does_not_suppress() {
        let manual = vec![
            Transaction::debit("Rent", 1199.99, date(2025, 2, 1)),
            Transaction::debit("rent", 1200.0, date(2025, 2, 1)),
            Transaction::debit("Rent", 1200.0, date(2025, 2, 2)),
        ];
        let generated = recurring_occurrences(
            &manual,
            &[rent()],
            window(date(2025, 1, 10), date(2025, 2, 28)),
        );
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].date, date(2025, 2, 1));
    }

    #[test]
    fn inactive_rules_and_credit_cards_are_not_expanded() {
        let mut inactive = RecurringRule::new("Gym", 30.0, TransactionKind::Debit, 5);
        inactive.day_of_month = None;
        let templates = vec![
            Template::from(inactive),
            CreditCardRule::new("Visa", 15).into(),
        ];
        let generated = recurring_occurrences(
            &[],
            &templates,
            window(date(2025, 1, 1), date(2025, 6, 30)),
        );
        assert!(generated.is_empty());
    }

    #[test]
    fn degenerate_window_generates_nothing() {
        let generated = recurring_occurrences(
            &[],
            &[rent()],
            window(date(2025, 3, 1), date(2025, 1, 1)),
        );
        assert!(generated.is_empty());
    }

    #[test]
    fn expansion_is_repeatable() {
        let w = window(date(2025, 1, 10), date(2025, 12, 31));
        let first = recurring_occurrences(&[], &[rent()], w);
        let second = recurring_occurrences(&[], &[rent()], w);
        assert_eq!(first, second);
    }

    #[test]
    fn card_search_starts_in_current_month_without_history() {
        let card = CreditCardRule::new("Visa", 15).with_id("visa");
        let next =
            next_credit_card_occurrence(&card, &[], window(date(2025, 1, 10), date(2025, 3, 31)));
        assert_eq!(next, Some(date(2025, 1, 15)));
    }

    #[test]
    fn card_search_requires_a_date_after_today() {
        let card = CreditCardRule::new("Visa", 10).with_id("visa");
        let next =
            next_credit_card_occurrence(&card, &[], window(date(2025, 1, 10), date(2025, 3, 31)));
        assert_eq!(next, Some(date(2025, 2, 10)));
    }

    #[test]
    fn card_search_gives_up_when_window_closes_first() {
        let card = CreditCardRule::new("Visa", 15).with_id("visa");
        let next =
            next_credit_card_occurrence(&card, &[], window(date(2025, 4, 20), date(2025, 4, 30)));
        assert_eq!(next, None);
    }

    #[test]
    fn card_search_continues_after_latest_payment() {
        let card = CreditCardRule::new("Visa", 31).with_id("visa");
        let existing = vec![
            Transaction::debit("Visa", 300.0, date(2025, 1, 31)),
            Transaction::debit("Visa", 280.0, date(2025, 2, 28)),
            Transaction::debit("Groceries", 80.0, date(2025, 5, 2)),
        ];
        let next = next_credit_card_occurrence(
            &card,
            &existing,
            window(date(2025, 1, 10), date(2025, 6, 30)),
        );
        assert_eq!(next, Some(date(2025, 3, 31)));
    }

    #[test]
    fn card_search_rolls_over_the_year() {
        let card = CreditCardRule::new("Visa", 5).with_id("visa");
        let existing = vec![Transaction::debit("Visa", 120.0, date(2024, 12, 5))];
        let next = next_credit_card_occurrence(
            &card,
            &existing,
            window(date(2024, 12, 20), date(2025, 2, 28)),
        );
        assert_eq!(next, Some(date(2025, 1, 5)));
    }

    #[test]
    fn card_search_covers_windows_longer_than_a_year() {
        let card = CreditCardRule::new("Visa", 1).with_id("visa");
        let existing = vec![Transaction::debit("Visa", 50.0, date(2023, 1, 1))];
        let next = next_credit_card_occurrence(
            &card,
            &existing,
            window(date(2025, 1, 10), date(2025, 3, 31)),
        );
        assert_eq!(next, Some(date(2025, 2, 1)));
    }

    #[test]
    fn card_without_day_has_no_next_date() {
        let mut card = CreditCardRule::new("Visa", 1);
        card.day_of_month = None;
        let next =
            next_credit_card_occurrence(&card, &[], window(date(2025, 1, 1), date(2025, 12, 31)));
        assert_eq!(next, None);
    }
}
