use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TodoData;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Pagination;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Query(query): Query<ListTodosQuery>,
) -> Result<ApiSuccess<Vec<TodoData>>, ApiError> {
    let pagination = Pagination::new(query.offset, query.limit).map_err(TodoError::from)?;

    state
        .todo_service
        .list_todos(&account.id, pagination)
        .await
        .map_err(ApiError::from)
        .map(|todos| {
            let todo_data: Vec<TodoData> = todos.iter().map(|t| t.into()).collect();
            ApiSuccess::new(StatusCode::OK, todo_data)
        })
}
