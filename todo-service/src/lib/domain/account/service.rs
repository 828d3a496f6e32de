use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Claim carrying the account email next to the `sub` account ID.
pub const EMAIL_CLAIM: &str = "email";

/// Domain service implementation for account operations.
///
/// Covers registration, login and token resolution. Argon2 work runs on the
/// blocking thread pool so it does not stall other requests.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Credential hasher and token service
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
            .await
            .map_err(|e| AccountError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn find_existing(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyRegistered);
        }

        let password_hash = self.hash_password(command.password).await?;

        let account = self
            .repository
            .create(NewAccount {
                email: command.email,
                first_name: command.first_name,
                last_name: command.last_name,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(account)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticationResult, AccountError> {
        let account = self.repository.find_by_email(email).await?;

        // A missing account still goes through verification, against the dummy hash.
        let (stored_hash, subject, claims) = match &account {
            Some(account) => (
                Some(account.password_hash.clone()),
                account.id.to_string(),
                Claims::new().with_extra(EMAIL_CLAIM, account.email.as_str()),
            ),
            None => (None, String::new(), Claims::new()),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, stored_hash.as_deref(), subject, claims)
        })
        .await
        .map_err(|e| AccountError::Unknown(format!("Credential check task failed: {}", e)))?;

        match outcome {
            Ok(result) => {
                if let Some(account) = &account {
                    tracing::info!(account_id = %account.id, "Login succeeded");
                }
                Ok(result)
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!("Login rejected");
                Err(AccountError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(AccountError::Unknown(format!(
                "Token generation failed: {}",
                e
            ))),
        }
    }

    async fn resolve(&self, token: &str) -> Result<Account, AccountError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            AccountError::InvalidCredentials
        })?;

        let subject = claims.sub.as_deref().ok_or_else(|| {
            tracing::debug!("Token has no subject claim");
            AccountError::InvalidCredentials
        })?;

        let account_id = AccountId::from_string(subject).map_err(|e| {
            tracing::debug!(error = %e, "Token subject is not an account ID");
            AccountError::InvalidCredentials
        })?;

        self.repository
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(account_id = %account_id, "Token subject no longer exists");
                AccountError::InvalidCredentials
            })
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.find_existing(id).await
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError> {
        let mut account = self.find_existing(id).await?;

        if let Some(new_email) = command.email {
            if new_email != account.email {
                if let Some(other) = self.repository.find_by_email(new_email.as_str()).await? {
                    if other.id != account.id {
                        return Err(AccountError::EmailAlreadyRegistered);
                    }
                }
            }
            account.email = new_email;
        }

        if let Some(first_name) = command.first_name {
            account.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            account.last_name = last_name;
        }

        if let Some(new_password) = command.password {
            account.password_hash = self.hash_password(new_password).await?;
        }

        let updated = self.repository.update(account).await?;

        tracing::info!(account_id = %updated.id, "Account updated");

        Ok(updated)
    }
}
