//! Display helpers for amounts and dates.

use chrono::{Datelike, NaiveDate};

use crate::ledger::settings::DEFAULT_DATE_FORMAT;

const GROUPING_SEPARATOR: char = ',';
const DECIMAL_SEPARATOR: char = '.';

/// Display symbol for an ISO 4217 code; `None` for codes without a known symbol.
pub fn symbol_for(code: &str) -> Option<&'static str> {
    let symbol = match code.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" | "CNY" => "¥",
        "INR" => "₹",
        "CHF" => "Fr",
        "KRW" => "₩",
        "GTQ" => "Q",
        _ => return None,
    };
    Some(symbol)
}

pub fn minor_units_for(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

/// Formats `value` with thousands grouping and `precision` decimals, no sign.
pub fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    match body.split_once(DECIMAL_SEPARATOR) {
        Some((int_part, frac)) => format!(
            "{}{}{}",
            group_digits(int_part, GROUPING_SEPARATOR),
            DECIMAL_SEPARATOR,
            frac
        ),
        None => group_digits(&body, GROUPING_SEPARATOR),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `-$1,234.50` style rendering. Unknown codes are written out in front of the
/// number instead of a symbol.
pub fn format_currency(amount: f64, code: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let precision = minor_units_for(code);
    let body = format_number(amount, precision);
    // Rounding may turn a tiny negative into zero; never print "-0.00".
    let negative = amount < 0.0 && body.chars().any(|ch| ch.is_ascii_digit() && ch != '0');
    let sign = if negative { "-" } else { "" };
    match symbol_for(code) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{} {body}", code.trim().to_ascii_uppercase()),
    }
}

/// Renders `date` using one of the supported display patterns. Unknown patterns
/// fall back to `MMM dd, yyyy`.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    match pattern {
        "yyyy/MM/dd" => date.format("%Y/%m/%d").to_string(),
        "MM/dd/yyyy" => date.format("%m/%d/%Y").to_string(),
        "yyyy-MM-dd" => date.format("%Y-%m-%d").to_string(),
        DEFAULT_DATE_FORMAT => format!(
            "{} {:02}, {}",
            month_label(date.month()),
            date.day(),
            date.year()
        ),
        _ => format_date(date, DEFAULT_DATE_FORMAT),
    }
}

/// True for the patterns [`format_date`] understands natively.
pub fn is_supported_date_format(pattern: &str) -> bool {
    matches!(
        pattern,
        "yyyy/MM/dd" | "MM/dd/yyyy" | "yyyy-MM-dd" | DEFAULT_DATE_FORMAT
    )
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
