use async_trait::async_trait;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;

/// Port for todo domain service operations.
///
/// Every single-todo operation checks ownership after the lookup, so a
/// foreign todo yields `Forbidden` and a missing one yields `NotFound`.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    /// List the requester's own todos.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_todos(
        &self,
        owner: &AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Create a todo owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_todo(
        &self,
        owner: &AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Retrieve one todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn get_todo(&self, id: &TodoId, requester: &AccountId) -> Result<Todo, TodoError>;

    /// Apply a partial update to one todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        id: &TodoId,
        requester: &AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// Delete one todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `Forbidden` - Todo belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, id: &TodoId, requester: &AccountId) -> Result<(), TodoError>;
}

/// Repository port for todo persistence operations.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Persist a new todo.
    ///
    /// # Returns
    /// Created todo with its assigned ID
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Retrieve todo by identifier, regardless of owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    /// List todos belonging to `owner`, ordered by ID.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(
        &self,
        owner: &AccountId,
        pagination: &Pagination,
    ) -> Result<Vec<Todo>, TodoError>;

    /// Persist changes to an existing todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// Remove a todo.
    ///
    /// # Errors
    /// * `NotFound` - Todo does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TodoId) -> Result<(), TodoError>;
}
