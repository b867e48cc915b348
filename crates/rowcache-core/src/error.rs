use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Row mapping error: {0}")]
    Mapping(String),

    #[error("Cache store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
