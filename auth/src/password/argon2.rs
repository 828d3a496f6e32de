use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id hash that no password is expected to match.
///
/// Carries the same algorithm, version and cost parameters as the output of
/// [`PasswordHasher::hash`], so verifying against it costs the same as
/// verifying against a real stored hash.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dG9kby1kdW1teS1zYWx0IQ$taLJYlBhI2bqJy/6xtl0Sq9LRarNlqp8/Lkx7jtVglk";

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison inside `argon2` is constant-time. A hash that
    /// cannot be parsed never matches; it is reported as `false` rather than
    /// as an error so callers can treat every failure the same way.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password123").expect("Failed to hash password");
        let second = hasher.hash("password123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password123"));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=65536,t=3,p=4$dummyhashdata"));
    }

    #[test]
    fn test_dummy_hash_matches_hasher_parameters() {
        let hasher = PasswordHasher::new();
        let real = hasher.hash("password123").expect("Failed to hash password");

        let real = PasswordHash::new(&real).expect("Real hash should parse");
        let dummy = PasswordHash::new(DUMMY_HASH).expect("Dummy hash should parse");

        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(dummy.version, real.version);
        assert_eq!(dummy.params, real.params);
        assert_eq!(
            dummy.hash.map(|h| h.len()),
            real.hash.map(|h| h.len())
        );
    }

    #[test]
    fn test_dummy_hash_rejects_passwords() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password123", DUMMY_HASH));
        assert!(!hasher.verify("", DUMMY_HASH));
    }
}
