//! Application services layered over the forecast engine and storage.

pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;
