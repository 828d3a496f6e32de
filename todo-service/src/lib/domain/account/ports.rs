use async_trait::async_trait;
use auth::AuthenticationResult;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Email uniqueness is checked before any hashing work is done.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email, names and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// Performs the same hashing work whether or not the email is known.
    ///
    /// # Arguments
    /// * `email` - Login identifier exactly as submitted
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Access token and token type
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str)
        -> Result<AuthenticationResult, AccountError>;

    /// Resolve the account a bearer token was issued to.
    ///
    /// # Arguments
    /// * `token` - Bearer token presented with the request
    ///
    /// # Returns
    /// Current account entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Token expired, malformed, badly signed, or its
    ///   account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn resolve(&self, token: &str) -> Result<Account, AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Update profile fields and, optionally, the password.
    ///
    /// # Arguments
    /// * `id` - Account ID to update
    /// * `command` - Command with optional email, names and password
    ///
    /// # Returns
    /// Updated account entity
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyRegistered` - New email belongs to another account
    /// * `DatabaseError` - Database operation failed
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// The unique index on email is the authoritative duplicate guard.
    ///
    /// # Returns
    /// Created account entity with its assigned ID
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Update existing account in storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyRegistered` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}
