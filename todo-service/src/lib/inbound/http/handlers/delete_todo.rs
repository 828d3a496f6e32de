use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(todo_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let todo_id = TodoId::from_string(&todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_todo(&todo_id, &account.id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
