use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("No active transaction")]
    NoTransaction,
    #[error("Query failed in {operation}: {message}")]
    QueryFailed {
        operation: &'static str,
        message: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing news aggregate.
    pub fn news_not_found(id: i64) -> Self {
        RepositoryError::NotFound {
            entity_type: "News",
            id: id.to_string(),
        }
    }

    pub fn query_failed(operation: &'static str, message: impl Into<String>) -> Self {
        RepositoryError::QueryFailed {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
