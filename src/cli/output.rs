use colored::Colorize;
use std::fmt;

use crate::currency::format_currency;
use crate::ledger::{Transaction, TransactionKind};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Warning,
    Section,
}

/// Styles a one-line message for the terminal.
pub fn message(kind: MessageKind, text: impl fmt::Display) -> String {
    let text = text.to_string();
    match kind {
        MessageKind::Success => text.green().to_string(),
        MessageKind::Warning => format!("warning: {text}").yellow().to_string(),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

/// A balance, red when below zero.
pub fn balance(amount: f64, currency: &str) -> String {
    let text = format_currency(amount, currency);
    if amount < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

/// A transaction amount with an explicit sign: `+` for credits, `-` for debits.
pub fn movement(transaction: &Transaction, currency: &str) -> String {
    let text = format_currency(transaction.amount, currency);
    match transaction.kind {
        TransactionKind::Credit => format!("+{text}").green().to_string(),
        TransactionKind::Debit => format!("-{text}").red().to_string(),
    }
}

/// Key/value block with the keys padded to a common width.
pub fn fields(entries: &[(&str, String)]) -> String {
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(key, value)| format!("  {key:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
