use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration for {0} not found")]
    NotFound(String),
    #[error("configuration for {0} already exists")]
    AlreadyExists(String),
    #[error("stored configuration for {0} is not valid JSON: {1}")]
    Corrupt(String, String),
    #[error("invalid user id: {0:?}")]
    InvalidId(String),
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
