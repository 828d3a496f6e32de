use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_LOGIN_MESSAGE;
use crate::domain::account::errors::AccountError;
use crate::inbound::http::router::AppState;

/// Exchange email and password for a bearer token.
///
/// Accepts the OAuth2 password form, where `username` carries the email.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginForm>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let result = state
        .account_service
        .login(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: result.access_token,
            token_type: result.token_type,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
