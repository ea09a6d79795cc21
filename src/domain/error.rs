use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("quiz document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
