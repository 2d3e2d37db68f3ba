//! Ledger records, persistence-friendly types, and date helpers.

pub mod calendar;
pub mod decode;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod settings;
pub mod template;
pub mod transaction;

pub use calendar::ForecastWindow;
pub use ledger::Ledger;
pub use settings::{ResolvedSettings, Settings};
pub use template::{CreditCardRule, RecurringRule, Template};
pub use transaction::{Transaction, TransactionKind};
