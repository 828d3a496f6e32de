use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(todo_id): Path<String>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .get_todo(&todo_id, &account.id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
