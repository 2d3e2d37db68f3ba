//! Persistence collaborator: a document store keyed by logical collection.

pub mod json_backend;
pub mod memory;

use std::fmt;

use serde_json::Value;

use crate::errors::ForecastError;

pub type Result<T> = std::result::Result<T, ForecastError>;

/// The logical collections the application persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Recurring,
    CreditCards,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Transactions,
        Collection::Recurring,
        Collection::CreditCards,
        Collection::Settings,
    ];

    /// Storage key, shared by every backend.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Transactions => "transactions",
            Collection::Recurring => "recurring",
            Collection::CreditCards => "credit-cards",
            Collection::Settings => "settings",
        }
    }

    /// Value a collection holds before anything was written to it.
    pub fn empty_value(self) -> Value {
        match self {
            Collection::Settings => Value::Object(Default::default()),
            _ => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstraction over persistence backends. Values are whole collections; there is
/// no partial update and no transaction spanning two collections.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored value, or `None` when the collection was never written.
    fn get(&self, collection: Collection) -> Result<Option<Value>>;
    fn put(&self, collection: Collection, value: &Value) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
