use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::PersonNameError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::RegisterAccountCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] PersonNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterAccountCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let first_name = PersonName::new(self.first_name)?;
        let last_name = PersonName::new(self.last_name)?;
        let password = Password::new(self.password)?;
        Ok(RegisterAccountCommand::new(
            email, first_name, last_name, password,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str) -> RegisterRequest {
        RegisterRequest {
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_becomes_command() {
        let command = request("correct-horse").try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "ada@example.com");
        assert_eq!(command.last_name.as_str(), "Lovelace");
    }

    #[test]
    fn test_short_password_is_rejected() {
        assert!(matches!(
            request("short").try_into_command(),
            Err(ParseRegisterRequestError::Password(_))
        ));
    }
}
