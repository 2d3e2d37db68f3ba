//! Business logic helpers for managing manual transactions.

use uuid::Uuid;

use crate::core::services::{require_amount, require_name, ServiceError, ServiceResult};
use crate::core::time::Clock;
use crate::ledger::{Ledger, Transaction};

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction under a fresh identifier and returns it.
    pub fn add(
        ledger: &mut Ledger,
        mut transaction: Transaction,
        clock: &dyn Clock,
    ) -> ServiceResult<String> {
        Self::validate(&transaction)?;
        transaction.id = Uuid::new_v4().to_string();
        transaction.amount = transaction.amount.abs();
        transaction.created_at = Some(clock.now());
        tracing::debug!(id = %transaction.id, name = %transaction.name, "transaction added");
        Ok(ledger.add_transaction(transaction))
    }

    /// Updates the transaction identified by `id` via the provided mutator.
    /// The identifier survives whatever the mutator does; an edit that leaves
    /// the transaction invalid is rejected and the stored copy kept.
    pub fn update<F>(ledger: &mut Ledger, id: &str, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let txn = ledger
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::not_found("Transaction", id))?;
        let mut edited = txn.clone();
        mutator(&mut edited);
        edited.id = id.to_string();
        edited.amount = edited.amount.abs();
        Self::validate(&edited)?;
        *txn = edited;
        Ok(())
    }

    /// Removes the transaction identified by `id`. Unknown ids report `false`.
    pub fn remove(ledger: &mut Ledger, id: &str) -> bool {
        ledger.remove_transaction(id).is_some()
    }

    /// Drops every manual transaction, leaving templates and settings alone.
    pub fn clear(ledger: &mut Ledger) -> usize {
        let removed = ledger.transactions.len();
        ledger.transactions.clear();
        removed
    }

    /// Returns a snapshot of the ledger's transactions.
    pub fn list(ledger: &Ledger) -> Vec<&Transaction> {
        ledger.transactions.iter().collect()
    }

    fn validate(transaction: &Transaction) -> ServiceResult<()> {
        require_name(&transaction.name)?;
        require_amount(transaction.amount)
    }
}
