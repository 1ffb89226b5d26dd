use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{SecurityConfig, MAX_JWT_EXPIRY_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// Signed token payload. Nothing about a session is kept server side; a
/// token is valid for exactly as long as its signature checks out and
/// `exp` lies in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Claims expiring `ttl` from now. Fails when the expiry falls outside
    /// the representable time range.
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        role: Role,
        ttl: Duration,
    ) -> Result<Self, AuthError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Signing(format!("token lifetime {} out of range", ttl)))?;

        Ok(Self {
            user_id,
            username: username.into(),
            role,
            exp: expires.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingHeader,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Forbidden")]
    Forbidden,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("JWT generation error: {0}")]
    Signing(String),
}

/// Hex SHA-256 digest used to store and compare account passwords
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Issues and verifies HMAC-signed JWTs with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            default_ttl,
        }
    }

    /// Build from validated settings. The lifetime is clamped to the range
    /// `AppConfig::validate` accepts.
    pub fn from_config(security: &SecurityConfig) -> Self {
        let minutes = security.jwt_expiry_minutes.clamp(1, MAX_JWT_EXPIRY_MINUTES);
        Self::new(
            security.jwt_secret.as_bytes(),
            security.jwt_algorithm,
            Duration::minutes(minutes),
        )
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for the given subject that expires `ttl` from now.
    pub fn issue(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, username, role, ttl)?;
        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature, algorithm, structure and expiry. Every failure
    /// collapses into `InvalidToken`; the cause is only logged.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::warn!("token rejected: {}", e);
                AuthError::InvalidToken
            })?
            .claims;

        // jsonwebtoken accepts exp == now; an expiry instant is already too late
        if claims.exp <= Utc::now().timestamp() {
            tracing::warn!("token rejected: expired at {}", claims.exp);
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
