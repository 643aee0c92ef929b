pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SecurityConfig;

pub use password::{Credentials, PasswordError};

/// Longest token lifetime accepted from configuration (one year)
pub const MAX_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims as presented by a client; `user_id` is checked by hand
#[derive(Debug, Deserialize)]
struct PresentedClaims {
    user_id: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token does not carry a user_id claim")]
    MissingClaim,

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidTtl(u64),
}

/// Issues and checks HS256 tokens bound to one user identity
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        let ttl = Some(ttl_hours)
            .filter(|hours| (1..=MAX_TTL_HOURS).contains(hours))
            .and_then(|hours| i64::try_from(hours).ok())
            .and_then(Duration::try_hours)
            .ok_or(AuthError::InvalidTtl(ttl_hours))?;

        // Only HS256 is accepted and expiry is exact
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(&config.jwt_secret, config.jwt_expiry_hours)
    }

    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenGeneration("expiry overflows the clock".to_string()))?;
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature, algorithm and expiry, then return the `user_id` claim
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<PresentedClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::Invalid(e.to_string()))?;

        match data.claims.user_id {
            Some(Value::String(user_id)) if !user_id.is_empty() => Ok(user_id),
            _ => Err(AuthError::MissingClaim),
        }
    }
}
