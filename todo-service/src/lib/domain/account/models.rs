use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::PersonNameError;

/// Account aggregate entity.
///
/// Represents a registered account. The password hash is a PHC string
/// produced by the credential hasher; the plaintext is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        s.parse::<i64>()
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and
/// compared exactly as given (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - Email longer than 255 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of an account holder (3-50 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid name.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 3 characters
    /// * `TooLong` - Name longer than 50 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PersonNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password accepted at registration or credential update.
///
/// Enforces the 8-128 character policy. Its `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Password shorter than 8 characters
    /// * `TooLong` - Password longer than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account data handed to the repository; the store assigns the ID.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: Password,
}

impl RegisterAccountCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Validated email address (login key)
    /// * `first_name` - Validated first name
    /// * `last_name` - Validated last name
    /// * `password` - Plaintext password (will be hashed by service)
    pub fn new(
        email: EmailAddress,
        first_name: PersonName,
        last_name: PersonName,
        password: Password,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            password,
        }
    }
}

/// Command to update an existing account with optional validated fields.
///
/// Only provided fields are updated. A new password is rehashed.
#[derive(Debug, Default)]
pub struct UpdateAccountCommand {
    pub email: Option<EmailAddress>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub password: Option<Password>,
}
