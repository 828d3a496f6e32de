use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a todo (raw JSON)
///
/// An explicit `"description": null` clears the description; omitting the
/// field leaves it untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub priority: Option<i64>,
    pub completed: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        let description = match self.description {
            Some(Some(text)) => Some(Some(TodoDescription::new(text)?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(UpdateTodoCommand {
            title: self.title.map(TodoTitle::new).transpose()?,
            description,
            priority: self.priority.map(Priority::new).transpose()?,
            completed: self.completed,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(todo_id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;
    let command = req.try_into_command()?;

    state
        .todo_service
        .update_todo(&todo_id, &account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
