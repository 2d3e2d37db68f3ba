//! CRUD for recurring rules plus the "record this occurrence now" shortcut.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{
    require_amount, require_day_of_month, require_name, ServiceError, ServiceResult,
};
use crate::core::time::Clock;
use crate::ledger::{Ledger, RecurringRule, Transaction};

pub struct RecurringService;

impl RecurringService {
    pub fn add(
        ledger: &mut Ledger,
        mut rule: RecurringRule,
        clock: &dyn Clock,
    ) -> ServiceResult<String> {
        Self::validate(&rule)?;
        rule.id = Uuid::new_v4().to_string();
        rule.amount = rule.amount.abs();
        rule.created_at = Some(clock.now());
        let id = rule.id.clone();
        ledger.recurring.push(rule);
        Ok(id)
    }

    /// Applies `mutator` to the rule, rejecting results that would no longer
    /// expand. The identifier is preserved.
    pub fn update<F>(ledger: &mut Ledger, id: &str, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut RecurringRule),
    {
        let rule = ledger
            .recurring_rule_mut(id)
            .ok_or_else(|| ServiceError::not_found("Recurring rule", id))?;
        let mut edited = rule.clone();
        mutator(&mut edited);
        edited.id = id.to_string();
        edited.amount = edited.amount.abs();
        Self::validate(&edited)?;
        *rule = edited;
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &str) -> bool {
        let before = ledger.recurring.len();
        ledger.recurring.retain(|rule| rule.id != id);
        ledger.recurring.len() != before
    }

    pub fn list(ledger: &Ledger) -> Vec<&RecurringRule> {
        ledger.recurring.iter().collect()
    }

    /// Records one manual transaction copying the rule's name, amount and type
    /// on `date`. Returns the new transaction id.
    pub fn use_rule(
        ledger: &mut Ledger,
        id: &str,
        date: NaiveDate,
        clock: &dyn Clock,
    ) -> ServiceResult<String> {
        let rule = ledger
            .recurring_rule(id)
            .ok_or_else(|| ServiceError::not_found("Recurring rule", id))?;
        let mut transaction = Transaction::new(rule.name.clone(), rule.amount, rule.kind, date);
        transaction.created_at = Some(clock.now());
        tracing::debug!(rule = %id, %date, "recurring rule used");
        Ok(ledger.add_transaction(transaction))
    }

    fn validate(rule: &RecurringRule) -> ServiceResult<()> {
        require_name(&rule.name)?;
        require_amount(rule.amount)?;
        require_day_of_month(rule.day_of_month)
    }
}
