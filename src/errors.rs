use thiserror::Error;

/// Error type that captures the failures of the plumbing around the forecast engine.
///
/// The engine itself (expansion and projection) never fails; these variants come
/// from persistence, configuration and the CRUD services.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("No upcoming payment date for `{0}` within the forecast window")]
    NoUpcomingDate(String),
}

impl ForecastError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ForecastError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
