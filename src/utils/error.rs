use thiserror::Error;

/// A single field that failed its shape or range check.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {field} '{value}': {reason}")]
pub struct FieldError {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed record: {reason}")]
    Malformed { reason: String },

    #[error(transparent)]
    InvalidField(#[from] FieldError),
}

impl ParseError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Cannot add more boats, maximum capacity of {capacity} reached")]
    AtCapacity { capacity: usize },

    #[error("Boat with name '{name}' already exists")]
    DuplicateName { name: String },

    #[error("No boat with name '{name}' found")]
    NotFound { name: String },

    #[error(transparent)]
    InvalidField(#[from] FieldError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("Payment of ${amount:.2} exceeds amount owed of ${owed:.2}")]
    ExceedsOwed { owed: f64, amount: f64 },

    #[error("No boat with name '{name}' found")]
    NotFound { name: String },
}

#[derive(Error, Debug)]
pub enum MarinaError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },
}

impl MarinaError {
    pub fn config(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarinaError>;
