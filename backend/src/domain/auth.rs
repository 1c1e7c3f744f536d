//! Authentication primitives: login credentials and API tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use rand::Rng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Number of random bytes behind a token; rendered as twice as many hex chars.
const TOKEN_BYTES: usize = 20;

/// Hex characters of the SHA-256 digest kept in a token fingerprint.
const FINGERPRINT_LEN: usize = 12;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use complaint_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("jdoe", "doe-1").unwrap();
/// assert_eq!(creds.username(), "jdoe");
/// assert_eq!(creds.password(), "doe-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised when parsing a presented token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthTokenValidationError {
    /// Nothing followed the scheme.
    #[error("token must not be empty")]
    Empty,
    /// The token is not hex.
    #[error("token must contain only hexadecimal characters")]
    InvalidCharacters,
}

/// Opaque API token issued at login and presented on every request.
///
/// `Debug` prints only the fingerprint so tokens never reach logs verbatim.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a fresh random token from `rng`.
    #[must_use]
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rng.fill(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse a token presented by a client.
    pub fn parse(raw: &str) -> Result<Self, AuthTokenValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthTokenValidationError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AuthTokenValidationError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Token value as returned to the client.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 prefix safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        encoded
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.fingerprint()).finish()
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}
