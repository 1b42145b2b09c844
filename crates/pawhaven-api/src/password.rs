use std::sync::Arc;

use anyhow::{Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString, rand_core::OsRng},
};

/// Argon2id cost knobs. Defaults are the argon2 crate's recommended values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
        }
    }
}

/// Salted Argon2id hashing. Hashing and verification are CPU-bound, so both
/// run on the blocking pool.
#[derive(Clone)]
pub struct Hasher {
    argon2: Argon2<'static>,
    /// Verified against when the user does not exist, so unknown emails
    /// cost the same as wrong passwords.
    dummy_hash: Arc<str>,
}

impl Hasher {
    pub fn new(cost: HashCost) -> Result<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow!("Invalid hash parameters: {}", e))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"pawhaven-no-such-user", &salt)
            .map_err(|e| anyhow!("Password hashing failed: {}", e))?
            .to_string();

        Ok(Self {
            argon2,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Hash `password` with a fresh random salt into a PHC string.
    pub async fn hash(&self, password: String) -> Result<String> {
        let argon2 = self.argon2.clone();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow!("Password hashing failed: {}", e))
        })
        .await?
    }

    /// Check `password` against a stored PHC string. A wrong password is
    /// `Ok(false)`; an unreadable stored hash is an error.
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool> {
        let argon2 = self.argon2.clone();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored_hash)
                .map_err(|e| anyhow!("Stored password hash is malformed: {}", e))?;

            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow!("Password verification failed: {}", e)),
            }
        })
        .await?
    }

    /// Spend a full verification on a login for an unknown user. Never matches
    /// a real account; the outcome is discarded by callers.
    pub async fn verify_missing_user(&self, password: String) -> Result<bool> {
        self.verify(password, self.dummy_hash.to_string()).await
    }
}
