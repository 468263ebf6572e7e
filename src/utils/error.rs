use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Payload shape error: {message}")]
    ShapeError { message: String },

    #[error("CSV sink error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database sink error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EtlError {
    pub fn shape(message: impl Into<String>) -> Self {
        EtlError::ShapeError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
