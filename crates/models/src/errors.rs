use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
