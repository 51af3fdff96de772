use thiserror::Error;

/// Errors raised when a request fails validation before it reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must be between {min} and {max} characters")]
    TitleLength { min: usize, max: usize },
    #[error("Category must be between {min} and {max} characters")]
    CategoryLength { min: usize, max: usize },
    #[error("Content block {index} has empty content")]
    EmptyBlockContent { index: usize },
    #[error("Content block {index} has a negative position")]
    NegativePosition { index: usize },
    #[error("Unknown content block type: {0}")]
    UnknownBlockType(String),
    #[error("End time must be after start time")]
    InvalidTimeWindow,
    #[error("Page must be at least 1")]
    InvalidPage,
    #[error("Limit must be between 1 and {max}")]
    InvalidLimit { max: u32 },
    #[error("Invalid news id: {0}")]
    InvalidId(String),
}
