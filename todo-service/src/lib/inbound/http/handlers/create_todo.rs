use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .todo_service
        .create_todo(&account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}

/// HTTP request body for creating a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    description: Option<String>,
    priority: Option<i64>,
    #[serde(default)]
    completed: bool,
}

impl CreateTodoRequest {
    fn try_into_command(self) -> Result<CreateTodoCommand, TodoError> {
        Ok(CreateTodoCommand {
            title: TodoTitle::new(self.title)?,
            description: self.description.map(TodoDescription::new).transpose()?,
            priority: self
                .priority
                .map(Priority::new)
                .transpose()?
                .unwrap_or_default(),
            completed: self.completed,
        })
    }
}
