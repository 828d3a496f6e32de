use std::fmt;

use auth::Owned;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::PaginationError;
use crate::domain::todo::errors::PriorityError;
use crate::domain::todo::errors::TodoDescriptionError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::todo::errors::TodoTitleError;

/// Todo unique identifier value object, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Parse a todo ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        s.parse::<i64>()
            .map(TodoId)
            .map_err(|e| TodoIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Todo entity owned by a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub owner_id: AccountId,
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Owned for Todo {
    type OwnerId = AccountId;

    fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }
}

/// Todo title value object (3-50 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `TooShort` - Title shorter than 3 characters
    /// * `TooLong` - Title longer than 50 characters
    pub fn new(title: String) -> Result<Self, TodoTitleError> {
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            Err(TodoTitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(TodoTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Todo description value object (at most 100 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `TooLong` - Description longer than 100 characters
    pub fn new(description: String) -> Result<Self, TodoDescriptionError> {
        let length = description.chars().count();
        if length > Self::MAX_LENGTH {
            Err(TodoDescriptionError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(description))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Priority from 1 (lowest) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    const MIN: u8 = 1;
    const MAX: u8 = 5;

    /// # Errors
    /// * `OutOfRange` - Value outside 1..=5
    pub fn new(value: i64) -> Result<Self, PriorityError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PriorityError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Offset/limit window for listing todos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Pagination {
    pub const MAX_LIMIT: i64 = 100;

    /// Build a window, defaulting to offset 0 and limit 100.
    ///
    /// # Errors
    /// * `NegativeOffset` - Offset below zero
    /// * `LimitOutOfRange` - Limit outside 1..=100
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Result<Self, PaginationError> {
        let offset = offset.unwrap_or(0);
        let limit = limit.unwrap_or(Self::MAX_LIMIT);

        if offset < 0 {
            return Err(PaginationError::NegativeOffset(offset));
        }
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(PaginationError::LimitOutOfRange {
                max: Self::MAX_LIMIT,
                actual: limit,
            });
        }

        Ok(Self { offset, limit })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::MAX_LIMIT,
        }
    }
}

/// Todo data handed to the repository; the store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub owner_id: AccountId,
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Command to create a todo. The owner comes from the authenticated account.
#[derive(Debug)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub priority: Priority,
    pub completed: bool,
}

/// Partial update of a todo.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<Option<TodoDescription>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}
