use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::TodoError;
use super::models::CreateTodoCommand;
use super::models::NewTodo;
use super::models::Pagination;
use super::models::Todo;
use super::models::TodoId;
use super::models::UpdateTodoCommand;
use super::ports::TodoRepository;
use super::ports::TodoServicePort;
use crate::domain::account::models::AccountId;

/// Concrete implementation of TodoServicePort.
///
/// Generic over repository for testability.
pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    todo_repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(todo_repository: Arc<TR>) -> Self {
        Self { todo_repository }
    }

    /// Load a todo and confirm the requester owns it.
    async fn find_owned(&self, id: &TodoId, requester: &AccountId) -> Result<Todo, TodoError> {
        let todo = self
            .todo_repository
            .find_by_id(id)
            .await?
            .ok_or(TodoError::NotFound(*id))?;

        auth::check_owner(&todo, requester).map_err(|_| {
            tracing::warn!(
                todo_id = %id,
                owner_id = %todo.owner_id,
                requester_id = %requester,
                "Ownership check failed"
            );
            TodoError::Forbidden(*id)
        })?;

        Ok(todo)
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn list_todos(
        &self,
        owner: &AccountId,
        pagination: Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        self.todo_repository.list_by_owner(owner, &pagination).await
    }

    async fn create_todo(
        &self,
        owner: &AccountId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = self
            .todo_repository
            .create(NewTodo {
                owner_id: *owner,
                title: command.title,
                description: command.description,
                priority: command.priority,
                completed: command.completed,
                created_at: Utc::now(),
            })
            .await?;

        tracing::debug!(todo_id = %todo.id, owner_id = %owner, "Todo created");

        Ok(todo)
    }

    async fn get_todo(&self, id: &TodoId, requester: &AccountId) -> Result<Todo, TodoError> {
        self.find_owned(id, requester).await
    }

    async fn update_todo(
        &self,
        id: &TodoId,
        requester: &AccountId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todo = self.find_owned(id, requester).await?;

        if let Some(title) = command.title {
            todo.title = title;
        }
        if let Some(description) = command.description {
            todo.description = description;
        }
        if let Some(priority) = command.priority {
            todo.priority = priority;
        }
        if let Some(completed) = command.completed {
            todo.completed = completed;
        }

        self.todo_repository.update(todo).await
    }

    async fn delete_todo(&self, id: &TodoId, requester: &AccountId) -> Result<(), TodoError> {
        self.find_owned(id, requester).await?;
        self.todo_repository.delete(id).await?;

        tracing::debug!(todo_id = %id, owner_id = %requester, "Todo deleted");

        Ok(())
    }
}
