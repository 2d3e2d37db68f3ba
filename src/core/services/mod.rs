pub mod credit_card_service;
pub mod forecast_service;
pub mod recurring_service;
pub mod settings_service;
pub mod transaction_service;

pub use credit_card_service::CreditCardService;
pub use forecast_service::{CardOutlook, ForecastReport, ForecastService};
pub use recurring_service::RecurringService;
pub use settings_service::SettingsService;
pub use transaction_service::TransactionService;

use crate::errors::ForecastError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error("{0}")]
    Invalid(String),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        ServiceError::Forecast(ForecastError::not_found(kind, id))
    }
}

pub(crate) fn require_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::Invalid("Name must not be empty".into()));
    }
    Ok(())
}

pub(crate) fn require_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() {
        return Err(ServiceError::Invalid(format!(
            "Amount must be a finite number, got {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn require_day_of_month(day: Option<u32>) -> ServiceResult<()> {
    match day {
        Some(day) if (1..=31).contains(&day) => Ok(()),
        Some(day) => Err(ServiceError::Invalid(format!(
            "Day of month must be between 1 and 31, got {day}"
        ))),
        None => Err(ServiceError::Invalid("Day of month is required".into())),
    }
}
