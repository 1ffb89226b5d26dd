use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, Role};

/// Signing secret used when nothing else is configured. Rejected in production.
pub const DEV_JWT_SECRET: &str = "orchestrator-dev-secret";

/// Longest token lifetime accepted from configuration (one year).
pub const MAX_JWT_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expiry_minutes: i64,
}

/// A login account. Only the SHA-256 digest of the password is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub user_id: i64,
    pub username: String,
    pub password_sha256: String,
    pub role: Role,
}

impl AccountConfig {
    pub fn new(user_id: i64, username: &str, password: &str, role: Role) -> Self {
        Self {
            user_id,
            username: username.to_string(),
            password_sha256: hash_password(password),
            role,
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password_sha256 == hash_password(password)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-default value in production")]
    InsecureSecret,
    #[error("JWT_SECRET must not be empty")]
    EmptySecret,
    #[error("jwt_expiry_minutes must be between 1 and 525600, got {0}")]
    InvalidExpiry(i64),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key/value source (the process environment in
    /// `from_env`). Unparseable values keep the current setting.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = lookup("ORCHESTRATOR_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("ORCHESTRATOR_PORT").or_else(|| lookup("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("JWT_ALGORITHM") {
            match Algorithm::from_str(&v) {
                Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => {
                    self.security.jwt_algorithm = alg;
                }
                _ => tracing::warn!("ignoring unsupported JWT_ALGORITHM '{}'", v),
            }
        }
        if let Some(v) = lookup("JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v.parse().unwrap_or(self.security.jwt_expiry_minutes);
        }

        self
    }

    /// Reject settings the server must not start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.environment == Environment::Production && self.security.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::InsecureSecret);
        }
        if !(1..=MAX_JWT_EXPIRY_MINUTES).contains(&self.security.jwt_expiry_minutes) {
            return Err(ConfigError::InvalidExpiry(self.security.jwt_expiry_minutes));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5050,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_algorithm: Algorithm::HS256,
                jwt_expiry_minutes: 30,
            },
            accounts: default_accounts(),
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            ..Self::development()
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            security: SecurityConfig {
                jwt_expiry_minutes: 15,
                ..Self::development().security
            },
            ..Self::development()
        }
    }
}

fn default_accounts() -> Vec<AccountConfig> {
    vec![
        AccountConfig::new(1, "testuser", "testpassword", Role::User),
        AccountConfig::new(2, "admin", "adminpassword", Role::Admin),
    ]
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
