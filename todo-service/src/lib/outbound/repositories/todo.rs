use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::models::AccountId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Pagination;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, TodoError> {
        let description: Option<String> = row.get("description");
        let priority: i16 = row.get("priority");

        Ok(Todo {
            id: TodoId(row.get("id")),
            owner_id: AccountId(row.get("owner_id")),
            title: TodoTitle::new(row.get("title"))?,
            description: description.map(TodoDescription::new).transpose()?,
            priority: Priority::new(priority.into())?,
            completed: row.get("completed"),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (owner_id, title, description, priority, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at
            "#,
        )
        .bind(todo.owner_id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(i16::from(todo.priority.value()))
        .bind(todo.completed)
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        Ok(Todo {
            id: TodoId(row.get("id")),
            owner_id: todo.owner_id,
            title: todo.title,
            description: todo.description,
            priority: todo.priority,
            completed: todo.completed,
            created_at: row.get("created_at"),
        })
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, priority, completed, created_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &AccountId,
        pagination: &Pagination,
    ) -> Result<Vec<Todo>, TodoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, description, priority, completed, created_at
            FROM todos
            WHERE owner_id = $1
            ORDER BY id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(owner.0)
        .bind(pagination.offset)
        .bind(pagination.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = $2, description = $3, priority = $4, completed = $5
            WHERE id = $1
            "#,
        )
        .bind(todo.id.0)
        .bind(todo.title.as_str())
        .bind(todo.description.as_ref().map(|d| d.as_str()))
        .bind(i16::from(todo.priority.value()))
        .bind(todo.completed)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(todo.id));
        }

        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(*id));
        }

        Ok(())
    }
}
