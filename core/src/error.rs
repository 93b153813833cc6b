use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Unknown assumption parameter '{name}'")]
    UnknownParameter { name: String },

    #[error("Value for '{parameter}' must be finite, got {value}")]
    NonFiniteValue { parameter: String, value: f64 },

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
