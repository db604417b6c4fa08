use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Io(format!("{}: {}", path.display(), err))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Model(ModelError::InvalidArgument(_)) => 1001,
            ServiceError::Model(ModelError::MalformedRecord(_)) => 1002,
            ServiceError::DuplicateEmail(_) => 1003,
            ServiceError::NotFound(_) => 1004,
            ServiceError::Io(_) => 1200,
        }
    }
}
