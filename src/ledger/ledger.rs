use serde::{Deserialize, Serialize};

use super::{
    settings::Settings,
    template::{CreditCardRule, RecurringRule, Template},
    transaction::Transaction,
};

/// In-memory snapshot of the four persisted collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub credit_cards: Vec<CreditCardRule>,
}

impl Ledger {
    pub fn add_transaction(&mut self, transaction: Transaction) -> String {
        let id = transaction.id.clone();
        self.transactions.push(transaction);
        id
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn recurring_rule(&self, id: &str) -> Option<&RecurringRule> {
        self.recurring.iter().find(|rule| rule.id == id)
    }

    pub fn recurring_rule_mut(&mut self, id: &str) -> Option<&mut RecurringRule> {
        self.recurring.iter_mut().find(|rule| rule.id == id)
    }

    pub fn credit_card(&self, id: &str) -> Option<&CreditCardRule> {
        self.credit_cards.iter().find(|card| card.id == id)
    }

    pub fn credit_card_mut(&mut self, id: &str) -> Option<&mut CreditCardRule> {
        self.credit_cards.iter_mut().find(|card| card.id == id)
    }

    /// All templates, recurring rules first.
    pub fn templates(&self) -> Vec<Template> {
        self.recurring
            .iter()
            .cloned()
            .map(Template::from)
            .chain(self.credit_cards.iter().cloned().map(Template::from))
            .collect()
    }

    /// Manual transactions recorded under `name`.
    pub fn transactions_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> {
        self.transactions.iter().filter(move |txn| txn.name == name)
    }
}
