use chrono::NaiveDate;

use crate::core::services::{require_amount, ServiceError, ServiceResult};
use crate::ledger::calendar::checked_add_days;
use crate::ledger::settings::MAX_HORIZON_DAYS;
use crate::ledger::Ledger;

/// Edits the persisted settings record.
pub struct SettingsService;

impl SettingsService {
    pub fn set_starting_balance(ledger: &mut Ledger, balance: f64) -> ServiceResult<()> {
        require_amount(balance)?;
        ledger.settings.starting_balance = balance;
        Ok(())
    }

    pub fn set_current_date(ledger: &mut Ledger, date: NaiveDate) {
        ledger.settings.current_date = Some(date);
    }

    pub fn set_forecast_end_date(ledger: &mut Ledger, date: NaiveDate) {
        ledger.settings.forecast_end_date = Some(date);
    }

    /// Moves the end date to `days` after the effective current date and returns it.
    pub fn quick_select(
        ledger: &mut Ledger,
        days: i64,
        today: NaiveDate,
    ) -> ServiceResult<NaiveDate> {
        if !(1..=MAX_HORIZON_DAYS).contains(&days) {
            return Err(ServiceError::Invalid(format!(
                "Horizon must be between 1 and {MAX_HORIZON_DAYS} days, got {days}"
            )));
        }
        let current = ledger.settings.current_date.unwrap_or(today);
        let end = checked_add_days(current, days).ok_or_else(|| {
            ServiceError::Invalid(format!("{days} days after {current} is out of range"))
        })?;
        ledger.settings.forecast_end_date = Some(end);
        Ok(end)
    }

    pub fn set_currency(ledger: &mut Ledger, code: &str) -> ServiceResult<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::Invalid("Currency code must not be empty".into()));
        }
        ledger.settings.currency_symbol = Some(code.to_ascii_uppercase());
        Ok(())
    }

    pub fn set_date_format(ledger: &mut Ledger, pattern: &str) -> ServiceResult<()> {
        ledger.settings.date_format = Some(non_empty(pattern, "Date format")?);
        Ok(())
    }

    pub fn set_language(ledger: &mut Ledger, language: &str) -> ServiceResult<()> {
        ledger.settings.language = Some(non_empty(language, "Language")?);
        Ok(())
    }
}

fn non_empty(value: &str, label: &str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::Invalid(format!("{label} must not be empty")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn quick_select_counts_from_stored_current_date() {
        let mut ledger = Ledger::default();
        SettingsService::set_current_date(&mut ledger, date(3, 1));
        let end = SettingsService::quick_select(&mut ledger, 90, date(1, 1)).unwrap();
        assert_eq!(end, date(5, 30));
        assert_eq!(ledger.settings.forecast_end_date, Some(date(5, 30)));
    }

    #[test]
    fn quick_select_falls_back_to_today() {
        let mut ledger = Ledger::default();
        let end = SettingsService::quick_select(&mut ledger, 7, date(1, 10)).unwrap();
        assert_eq!(end, date(1, 17));
        assert!(SettingsService::quick_select(&mut ledger, 0, date(1, 10)).is_err());
    }

    #[test]
    fn quick_select_rejects_horizons_past_the_calendar() {
        let mut ledger = Ledger::default();
        let err = SettingsService::quick_select(&mut ledger, i64::MAX, date(1, 10)).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(matches!(
            SettingsService::quick_select(&mut ledger, 9_000_000_000_000_000, date(1, 10)),
            Err(ServiceError::Invalid(_))
        ));
        assert_eq!(ledger.settings.forecast_end_date, None);

        let end =
            SettingsService::quick_select(&mut ledger, MAX_HORIZON_DAYS, date(1, 10)).unwrap();
        assert_eq!(end.year(), 2124);
    }

    #[test]
    fn setters_validate_input() {
        let mut ledger = Ledger::default();
        assert!(SettingsService::set_starting_balance(&mut ledger, f64::INFINITY).is_err());
        SettingsService::set_starting_balance(&mut ledger, -25.5).unwrap();
        SettingsService::set_currency(&mut ledger, " eur ").unwrap();
        assert!(SettingsService::set_language(&mut ledger, "").is_err());

        let resolved = ledger.settings.resolve(date(1, 10));
        assert_eq!(resolved.starting_balance, -25.5);
        assert_eq!(resolved.currency_symbol, "EUR");
        assert_eq!(resolved.language, "en");
    }
}
