use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinhubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid amount: {0} (amounts must be finite and non-negative)")]
    InvalidAmount(f64),

    #[error("Duplicate transaction id: {0}")]
    DuplicateId(String),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Upload {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: &'static str,
        to: &'static str,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FinhubError>;
