use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Todo;

pub mod create_todo;
pub mod delete_todo;
pub mod get_current_account;
pub mod get_todo;
pub mod list_todos;
pub mod login;
pub mod register;
pub mod update_current_account;
pub mod update_todo;

/// Message returned for every authentication failure.
pub const INVALID_TOKEN_MESSAGE: &str = "Could not validate credentials";
pub const INVALID_LOGIN_MESSAGE: &str = "Incorrect email or password";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Unauthorized(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg)),
                )
                    .into_response();
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyRegistered => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            }
            AccountError::InvalidEmail(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound("Todo not found".to_string()),
            TodoError::Forbidden(_) => {
                ApiError::Forbidden("Not authorized to access this todo".to_string())
            }
            TodoError::InvalidTodoId(_)
            | TodoError::InvalidTitle(_)
            | TodoError::InvalidDescription(_)
            | TodoError::InvalidPriority(_)
            | TodoError::InvalidPagination(_) => ApiError::UnprocessableEntity(err.to_string()),
            TodoError::DatabaseError(_) | TodoError::Unknown(_) => {
                tracing::error!(error = %err, "Todo operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an account; the password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            email: account.email.as_str().to_string(),
            first_name: account.first_name.as_str().to_string(),
            last_name: account.last_name.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: u8,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.0,
            owner_id: todo.owner_id.0,
            title: todo.title.as_str().to_string(),
            description: todo.description.as_ref().map(|d| d.as_str().to_string()),
            priority: todo.priority.value(),
            completed: todo.completed,
            created_at: todo.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::errors::EmailError;
    use crate::domain::todo::models::TodoId;

    #[test]
    fn test_account_errors_map_to_status() {
        assert_eq!(
            ApiError::from(AccountError::EmailAlreadyRegistered),
            ApiError::BadRequest("Email already registered".to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::InvalidEmail(EmailError::InvalidFormat(
                "x".to_string()
            ))),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_infrastructure_errors_are_not_leaked() {
        let err = ApiError::from(AccountError::DatabaseError(
            "connection refused to 10.0.0.3".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_forbidden_is_distinct_from_not_found() {
        assert!(matches!(
            ApiError::from(TodoError::Forbidden(TodoId(1))),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(TodoError::NotFound(TodoId(1))),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_unauthorized_response_carries_bearer_challenge() {
        let response = ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
