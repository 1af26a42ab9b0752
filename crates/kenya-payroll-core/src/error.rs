use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("Invalid amount: {field} — {reason}")]
    InvalidAmount { field: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PayrollError {
    pub(crate) fn invalid_amount(field: &str, reason: impl Into<String>) -> Self {
        PayrollError::InvalidAmount {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PayrollError {
    fn from(e: serde_json::Error) -> Self {
        PayrollError::SerializationError(e.to_string())
    }
}
