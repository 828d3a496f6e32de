use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Token lifetime used when neither the handler nor the caller sets one.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// JWT token handler for issuing and validating tokens.
///
/// Signs with a single server-held secret and a fixed HMAC algorithm
/// (HS256 unless configured otherwise). There is no fallback key: replacing
/// the secret invalidates every token issued under the previous one.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 and a 30 minute lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    /// Select the signing algorithm by its JOSE name (`HS256`, `HS384`, `HS512`).
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown name or not an HMAC algorithm
    pub fn with_algorithm(mut self, name: &str) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(name)
            .map_err(|_| JwtError::UnsupportedAlgorithm(name.to_string()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                self.algorithm = algorithm;
                Ok(self)
            }
            _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Set the default token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for a subject.
    ///
    /// Stamps `sub`, `iat` (now) and `exp` (now + ttl) over the given claims.
    /// A negative `ttl` yields a token that is already expired.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `claims` - Custom claims to embed
    /// * `ttl` - Lifetime override; the handler default is used when `None`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        claims: Claims,
        ttl: Option<Duration>,
    ) -> Result<String, JwtError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + ttl.unwrap_or(self.ttl);

        let claims = claims
            .with_subject(subject)
            .with_issued_at(issued_at.timestamp())
            .with_expiration(expires_at.timestamp());

        self.encode(&claims)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Current time is past `exp`
    /// * `InvalidSignature` - Signature does not verify against the secret
    /// * `Malformed` - Token is structurally invalid
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode(token)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// `exp` is mandatory and checked without leeway.
    ///
    /// # Errors
    /// * `Expired` - Token has expired
    /// * `InvalidSignature` - Token signature is invalid
    /// * `Malformed` - Token is not a well-formed JWT for this handler
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
