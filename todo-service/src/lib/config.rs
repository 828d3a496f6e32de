use std::env;

use auth::JwtHandler;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    auth::DEFAULT_TTL_MINUTES
}

impl JwtConfig {
    /// Build the token service described by this section.
    ///
    /// # Errors
    /// * `Message` - Algorithm is not an HMAC algorithm
    pub fn jwt_handler(&self) -> Result<JwtHandler, ConfigError> {
        let handler = JwtHandler::new(self.secret.as_bytes())
            .with_algorithm(&self.algorithm)
            .map_err(|e| ConfigError::Message(format!("jwt.algorithm: {}", e)))?;

        Ok(handler.with_ttl(chrono::Duration::minutes(self.expiration_minutes)))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.jwt.expiration_minutes < 1 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be at least 1, got {}",
                self.jwt.expiration_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(expiration_minutes: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/todo".to_string(),
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                algorithm: default_algorithm(),
                expiration_minutes,
            },
        }
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let secret = "secret-from-environment-at-least-32-bytes";
        env::set_var("JWT__SECRET", secret);
        env::set_var("JWT__EXPIRATION_MINUTES", "15");

        let loaded = Config::load();

        env::remove_var("JWT__SECRET");
        env::remove_var("JWT__EXPIRATION_MINUTES");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.jwt.secret, secret);
        assert_eq!(loaded.jwt.expiration_minutes, 15);
        assert_eq!(loaded.server.http_port, 8080);
    }

    #[test]
    fn test_validate_rejects_non_positive_expiration() {
        assert!(config(30).validate().is_ok());
        assert!(config(0).validate().is_err());
    }

    #[test]
    fn test_jwt_handler_uses_configured_ttl() {
        let handler = config(45).jwt.jwt_handler().unwrap();
        assert_eq!(handler.ttl(), chrono::Duration::minutes(45));
    }

    #[test]
    fn test_jwt_handler_rejects_asymmetric_algorithm() {
        let mut config = config(30);
        config.jwt.algorithm = "RS256".to_string();
        assert!(config.jwt.jwt_handler().is_err());
    }
}
