//! Argon2 password hashing for stored login accounts.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Failures raised while hashing or checking a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed {
        /// Underlying failure description.
        message: String,
    },
    /// Hashing or verification failed for a reason other than a mismatch.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Underlying failure description.
        message: String,
    },
}

/// Hash `password` with a fresh random salt, returning a PHC string.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::Hashing {
            message: err.to_string(),
        })
}

/// Check `password` against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; errors only for unusable hashes.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| PasswordHashError::Malformed {
        message: err.to_string(),
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::Hashing {
            message: err.to_string(),
        }),
    }
}
