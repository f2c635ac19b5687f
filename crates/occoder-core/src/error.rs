use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing dictionary '{name}' for scheme '{scheme}'")]
    DictionaryMissing { scheme: String, name: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
