//! Credit-card payment slots: CRUD, next-date lookup and payment recording.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{
    require_amount, require_day_of_month, require_name, ServiceError, ServiceResult,
};
use crate::core::time::Clock;
use crate::errors::ForecastError;
use crate::forecast::next_credit_card_occurrence;
use crate::ledger::{CreditCardRule, ForecastWindow, Ledger, Transaction};

pub struct CreditCardService;

impl CreditCardService {
    pub fn add(
        ledger: &mut Ledger,
        mut card: CreditCardRule,
        clock: &dyn Clock,
    ) -> ServiceResult<String> {
        Self::validate(&card)?;
        card.id = Uuid::new_v4().to_string();
        card.created_at = Some(clock.now());
        let id = card.id.clone();
        ledger.credit_cards.push(card);
        Ok(id)
    }

    pub fn update<F>(ledger: &mut Ledger, id: &str, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut CreditCardRule),
    {
        let card = ledger
            .credit_card_mut(id)
            .ok_or_else(|| ServiceError::not_found("Credit card", id))?;
        let mut edited = card.clone();
        mutator(&mut edited);
        edited.id = id.to_string();
        Self::validate(&edited)?;
        *card = edited;
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &str) -> bool {
        let before = ledger.credit_cards.len();
        ledger.credit_cards.retain(|card| card.id != id);
        ledger.credit_cards.len() != before
    }

    pub fn list(ledger: &Ledger) -> Vec<&CreditCardRule> {
        ledger.credit_cards.iter().collect()
    }

    /// Next unpaid slot of the card inside `window`, if any.
    pub fn next_payment(
        ledger: &Ledger,
        id: &str,
        window: ForecastWindow,
    ) -> ServiceResult<Option<NaiveDate>> {
        let card = ledger
            .credit_card(id)
            .ok_or_else(|| ServiceError::not_found("Credit card", id))?;
        Ok(next_credit_card_occurrence(card, &ledger.transactions, window))
    }

    /// Records `amount` as a debit named after the card on its next slot.
    pub fn record_payment(
        ledger: &mut Ledger,
        id: &str,
        amount: f64,
        window: ForecastWindow,
        clock: &dyn Clock,
    ) -> ServiceResult<String> {
        require_amount(amount)?;
        if amount == 0.0 {
            return Err(ServiceError::Invalid("Payment amount must not be zero".into()));
        }
        let card = ledger
            .credit_card(id)
            .ok_or_else(|| ServiceError::not_found("Credit card", id))?;
        let date = next_credit_card_occurrence(card, &ledger.transactions, window)
            .ok_or_else(|| ForecastError::NoUpcomingDate(card.name.clone()))?;

        let mut payment = Transaction::debit(card.name.clone(), amount, date);
        payment.created_at = Some(clock.now());
        tracing::info!(card = %id, %date, amount = payment.amount, "credit-card payment recorded");
        Ok(ledger.add_transaction(payment))
    }

    fn validate(card: &CreditCardRule) -> ServiceResult<()> {
        require_name(&card.name)?;
        require_day_of_month(card.day_of_month)
    }
}
