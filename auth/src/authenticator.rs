use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::DUMMY_HASH;

/// Token type reported alongside issued access tokens.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Credential checks always perform one full Argon2 verification, whether or
/// not an account was found, so response timing does not reveal which
/// identifiers are registered.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator around a configured token handler.
    ///
    /// # Arguments
    /// * `jwt_handler` - Token service carrying the secret, algorithm and lifetime
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against an optional stored hash.
    ///
    /// When no hash is supplied (unknown account) the password is checked
    /// against [`DUMMY_HASH`] so that both branches do the same work.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Account missing or password does not match
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = self
            .password_hasher
            .verify(password, stored_hash.unwrap_or(DUMMY_HASH));

        if stored_hash.is_none() || !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Verify credentials and generate a JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, `None` if the account is unknown
    /// * `subject` - Identity to embed as `sub`
    /// * `claims` - Additional claims to embed
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Account missing or password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: impl ToString,
        claims: Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.verify_credentials(password, stored_hash)?;

        let access_token = self.jwt_handler.issue(subject, claims, None)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
        })
    }

    /// Validate and decode a JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token expired, malformed, or signed with another key
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(JwtHandler::new(SECRET))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, Some(&hash), 42, Claims::new())
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.token_type, "bearer");

        let decoded = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.sub, Some("42".to_string()));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", Some(&hash), 42, Claims::new());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unknown_account() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", None, 42, Claims::new());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_credentials_malformed_stored_hash() {
        let authenticator = authenticator();

        let result = authenticator.verify_credentials("my_password", Some("not-a-hash"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_account_costs_as_much_as_wrong_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        // Warm up allocator and code paths.
        let _ = authenticator.verify_credentials("wrong_password", Some(&hash));

        let start = Instant::now();
        let _ = authenticator.verify_credentials("wrong_password", Some(&hash));
        let wrong_password = start.elapsed();

        let start = Instant::now();
        let _ = authenticator.verify_credentials("wrong_password", None);
        let unknown_account = start.elapsed();

        assert!(
            unknown_account * 4 >= wrong_password,
            "unknown account took {:?}, wrong password took {:?}",
            unknown_account,
            wrong_password
        );
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let token = JwtHandler::new(SECRET)
            .issue(42, Claims::new().with_extra("email", "a@x.com"), None)
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(decoded.sub, Some("42".to_string()));
        assert_eq!(decoded.extra_str("email"), Some("a@x.com"));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
