use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    calendar::{add_days, ForecastWindow},
    decode,
};

pub const DEFAULT_HORIZON_DAYS: i64 = 30;
/// Longest horizon accepted from a user or a config file.
pub const MAX_HORIZON_DAYS: i64 = 36_500;
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_DATE_FORMAT: &str = "MMM dd, yyyy";
pub const DEFAULT_LANGUAGE: &str = "en";

/// The persisted settings record. Every field may be missing on disk; the
/// defaults are applied by [`Settings::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "decode::balance")]
    pub starting_balance: f64,
    #[serde(
        default,
        deserialize_with = "decode::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "decode::optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub forecast_end_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "decode::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "decode::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_format: Option<String>,
    #[serde(
        default,
        deserialize_with = "decode::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
    /// Fields owned by other clients (theme toggles and the like) survive a round trip.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSettings {
    pub starting_balance: f64,
    pub window: ForecastWindow,
    pub currency_symbol: String,
    pub date_format: String,
    pub language: String,
}

impl Settings {
    /// Applies defaults with the standard 30 day horizon.
    pub fn resolve(&self, today: NaiveDate) -> ResolvedSettings {
        self.resolve_with_horizon(today, DEFAULT_HORIZON_DAYS)
    }

    /// Missing current date falls back to `today`; missing end date to
    /// `current date + horizon_days`.
    pub fn resolve_with_horizon(&self, today: NaiveDate, horizon_days: i64) -> ResolvedSettings {
        let current_date = self.current_date.unwrap_or(today);
        let forecast_end_date = self
            .forecast_end_date
            .unwrap_or_else(|| add_days(current_date, horizon_days));
        ResolvedSettings {
            starting_balance: self.starting_balance,
            window: ForecastWindow::new(current_date, forecast_end_date),
            currency_symbol: self
                .currency_symbol
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            date_format: self
                .date_format
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        }
    }
}
