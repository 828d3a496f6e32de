use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::PersonName;
use crate::domain::account::ports::AccountRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &PgRow) -> Result<Account, AccountError> {
        Ok(Account {
            id: AccountId(row.get("id")),
            email: EmailAddress::new(row.get("email"))?,
            first_name: PersonName::new(row.get("first_name"))?,
            last_name: PersonName::new(row.get("last_name"))?,
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
        })
    }

    fn map_write_error(e: sqlx::Error) -> AccountError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
            {
                return AccountError::EmailAlreadyRegistered;
            }
        }
        AccountError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (email, first_name, last_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_write_error)?;

        Ok(Account {
            id: AccountId(row.get("id")),
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            password_hash: account.password_hash,
            created_at: row.get("created_at"),
        })
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, first_name = $3, last_name = $4, password_hash = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(&account.password_hash)
        .execute(&self.pool)
        .await
        .map_err(Self::map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
