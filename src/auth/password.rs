use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use std::sync::Arc;

use crate::config::SecurityConfig;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Invalid password hashing parameters: {0}")]
    Params(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored password digest is malformed: {0}")]
    MalformedDigest(String),

    #[error("Password task failed: {0}")]
    Task(String),
}

/// Salted Argon2id hashing with a fixed cost
#[derive(Debug, Clone)]
pub struct Credentials {
    params: Params,
    // Digest at the same cost, verified when no account matches
    dummy: Arc<str>,
}

impl Credentials {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        let mut credentials = Self { params, dummy: Arc::from("") };
        credentials.dummy = Arc::from(credentials.hash("menu-api-unknown-account")?);
        Ok(credentials)
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(config.password_memory_kib, config.password_iterations)
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hashing(e.to_string()))
    }

    /// `Ok(false)` on mismatch; `Err` only when `digest` cannot be parsed
    pub fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest).map_err(|e| PasswordError::MalformedDigest(e.to_string()))?;
        match self.hasher().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedDigest(e.to_string())),
        }
    }

    /// Spend the same work as a real check for an account that does not exist.
    /// Always `Ok(false)`.
    pub async fn verify_absent_blocking(&self, plaintext: String) -> Result<bool, PasswordError> {
        let digest = self.dummy.to_string();
        self.verify_blocking(digest, plaintext).await?;
        Ok(false)
    }

    /// Run [`Credentials::hash`] on the blocking pool
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, PasswordError> {
        let credentials = self.clone();
        tokio::task::spawn_blocking(move || credentials.hash(&plaintext))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// Run [`Credentials::verify`] on the blocking pool
    pub async fn verify_blocking(&self, digest: String, plaintext: String) -> Result<bool, PasswordError> {
        let credentials = self.clone();
        tokio::task::spawn_blocking(move || credentials.verify(&digest, &plaintext))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Credentials {
        Credentials::new(8, 1).unwrap()
    }

    #[test]
    fn hash_is_salted_and_verifiable() {
        let credentials = cheap();
        let first = credentials.hash("correct horse").unwrap();
        let second = credentials.hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(credentials.verify(&first, "correct horse").unwrap());
        assert!(!credentials.verify(&first, "wrong horse").unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(matches!(
            cheap().verify("plaintext-not-a-digest", "anything"),
            Err(PasswordError::MalformedDigest(_))
        ));
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(matches!(Credentials::new(8, 0), Err(PasswordError::Params(_))));
    }

    #[tokio::test]
    async fn absent_accounts_cost_the_same_and_never_match() {
        let credentials = Credentials::new(16, 2).unwrap();
        let real = credentials.hash("correct horse").unwrap();

        let dummy = PasswordHash::new(&credentials.dummy).unwrap();
        let stored = PasswordHash::new(&real).unwrap();
        assert_eq!(dummy.algorithm.as_str(), stored.algorithm.as_str());
        assert_eq!(dummy.params.as_str(), stored.params.as_str());

        assert!(!credentials
            .verify_absent_blocking("menu-api-unknown-account".to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn blocking_variants_agree() {
        let credentials = cheap();
        let digest = credentials.hash_blocking("secret-pass".to_string()).await.unwrap();
        assert!(credentials
            .verify_blocking(digest, "secret-pass".to_string())
            .await
            .unwrap());
    }
}
