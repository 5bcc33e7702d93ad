use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Payload is not a well-formed JSON object
    #[error("payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
