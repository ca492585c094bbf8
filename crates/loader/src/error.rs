use thiserror::Error;

/// Reasons an artifact could not be turned into a value.
///
/// These never leave the crate through [`crate::LiveDataLoader`]; they are
/// logged and the artifact is treated as absent.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value {value:?} in column '{column}' at data row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
