//! Authentication utilities library
//!
//! Provides the security core of the todo service:
//! - Password hashing (Argon2id) with a timing-equalization dummy hash
//! - JWT token issuance and validation
//! - Authentication coordination
//! - Resource ownership checks
//!
//! Services adapt these implementations behind their own domain ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(42, Claims::new(), None).unwrap();
//! let claims = handler.validate(&token).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("42"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, JwtHandler};
//!
//! let auth = Authenticator::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!"));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", Some(&hash), 42, Claims::new())
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("42"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod ownership;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::BEARER_TOKEN_TYPE;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::DEFAULT_TTL_MINUTES;
pub use ownership::check_owner;
pub use ownership::Forbidden;
pub use ownership::Owned;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::DUMMY_HASH;
