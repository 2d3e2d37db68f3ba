#![doc(test(attr(deny(warnings))))]

//! Budget Forecast projects an account balance over a chosen date window from a
//! starting balance, manual transactions and monthly recurring obligations.
//!
//! The engine lives in [`forecast`]; everything else is the plumbing that feeds it
//! (records, persistence, configuration) and presents its output.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    init_with_filter(None);
}

/// Same as [`init`], but lets the caller supply an explicit filter directive
/// (typically read from [`config::Config::log_filter`]).
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::debug!("Budget Forecast tracing initialized.");
    });
}
