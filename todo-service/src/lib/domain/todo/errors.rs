use thiserror::Error;

use crate::domain::todo::models::TodoId;

/// Error type for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo ID format: {0}")]
    InvalidFormat(String),
}

/// Error type for TodoTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTitleError {
    #[error("Title too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for TodoDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDescriptionError {
    #[error("Description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for Priority validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriorityError {
    #[error("Priority must be between {min} and {max}, got {actual}")]
    OutOfRange { min: u8, max: u8, actual: i64 },
}

/// Error type for Pagination validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Offset must not be negative, got {0}")]
    NegativeOffset(i64),

    #[error("Limit must be between 1 and {max}, got {actual}")]
    LimitOutOfRange { max: i64, actual: i64 },
}

/// Top-level error type for all todo-related operations
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TodoTitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] TodoDescriptionError),

    #[error("Invalid priority: {0}")]
    InvalidPriority(#[from] PriorityError),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),

    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    /// The todo exists but belongs to another account.
    #[error("Not authorized to access todo {0}")]
    Forbidden(TodoId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
