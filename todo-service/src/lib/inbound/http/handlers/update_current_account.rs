use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::PersonName;
use crate::domain::account::models::UpdateAccountCommand;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating the current account (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, AccountError> {
        // Validation errors convert via #[from]
        Ok(UpdateAccountCommand {
            email: self.email.map(EmailAddress::new).transpose()?,
            first_name: self.first_name.map(PersonName::new).transpose()?,
            last_name: self.last_name.map(PersonName::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
        })
    }
}

pub async fn update_current_account(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .account_service
        .update_account(&account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
