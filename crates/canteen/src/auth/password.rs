//! Password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, Params};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Password hashing failed: {0}")]
pub struct HashError(pub String);

/// Hashes and checks passwords. Both calls are CPU-bound; run them off the async workers.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// `false` for a wrong password and for a hash that cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Does the work of a failed `verify` for a username that does not exist, so the
    /// response time does not tell the two cases apart.
    fn verify_unknown(&self, password: &str);
}

const UNKNOWN_USER_PASSWORD: &str = "unknown-user";

/// Argon2id in PHC string format.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    /// Hashed with the same parameters on first use; verified against for unknown usernames.
    unknown_user_hash: OnceLock<Option<String>>,
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
            unknown_user_hash: OnceLock::new(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.argon2
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn verify_unknown(&self, password: &str) {
        let hash = self
            .unknown_user_hash
            .get_or_init(|| self.hash(UNKNOWN_USER_PASSWORD).ok());
        if let Some(hash) = hash {
            self.verify(password, hash);
        }
    }
}
