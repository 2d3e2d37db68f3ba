use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::ForecastError;
use crate::ledger::{Ledger, Settings};
use crate::storage::{Collection, StorageBackend};

/// Outcome of loading every collection into a [`Ledger`].
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    /// One line per record or collection that could not be used.
    pub warnings: Vec<String>,
}

/// Facade that turns raw stored collections into a typed ledger and back.
pub struct LedgerManager {
    storage: Box<dyn StorageBackend>,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Loads all collections. Bad records are dropped and reported, never fatal;
    /// only backend failures surface as errors.
    pub fn load(&self) -> Result<LoadReport, ForecastError> {
        let mut warnings = Vec::new();
        let transactions = self.load_list(Collection::Transactions, &mut warnings)?;
        let recurring = self.load_list(Collection::Recurring, &mut warnings)?;
        let credit_cards = self.load_list(Collection::CreditCards, &mut warnings)?;
        let settings = self.load_settings(&mut warnings)?;

        debug!(warnings = warnings.len(), "ledger loaded");
        Ok(LoadReport {
            ledger: Ledger {
                settings,
                transactions,
                recurring,
                credit_cards,
            },
            warnings,
        })
    }

    pub fn save_transactions(&self, ledger: &Ledger) -> Result<(), ForecastError> {
        self.save(Collection::Transactions, &ledger.transactions)
    }

    pub fn save_recurring(&self, ledger: &Ledger) -> Result<(), ForecastError> {
        self.save(Collection::Recurring, &ledger.recurring)
    }

    pub fn save_credit_cards(&self, ledger: &Ledger) -> Result<(), ForecastError> {
        self.save(Collection::CreditCards, &ledger.credit_cards)
    }

    pub fn save_settings(&self, ledger: &Ledger) -> Result<(), ForecastError> {
        self.save(Collection::Settings, &ledger.settings)
    }

    pub fn save_all(&self, ledger: &Ledger) -> Result<(), ForecastError> {
        self.save_transactions(ledger)?;
        self.save_recurring(ledger)?;
        self.save_credit_cards(ledger)?;
        self.save_settings(ledger)
    }

    fn save<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<(), ForecastError> {
        let json = serde_json::to_value(value)?;
        self.storage.put(collection, &json)
    }

    fn load_list<T: DeserializeOwned>(
        &self,
        collection: Collection,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<T>, ForecastError> {
        let items = match self.storage.get(collection)? {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                warnings.push(format!(
                    "{collection}: expected a list, found {}; ignoring it",
                    kind_of(&other)
                ));
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<T>(item) {
                Ok(record) => records.push(record),
                Err(err) => warnings.push(format!("{collection}[{index}] dropped: {err}")),
            }
        }
        debug!(%collection, count = records.len(), "collection loaded");
        Ok(records)
    }

    fn load_settings(&self, warnings: &mut Vec<String>) -> Result<Settings, ForecastError> {
        match self.storage.get(Collection::Settings)? {
            None | Some(Value::Null) => Ok(Settings::default()),
            Some(value) => match serde_json::from_value::<Settings>(value) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    warnings.push(format!("settings: unusable record ({err}); using defaults"));
                    Ok(Settings::default())
                }
            },
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
