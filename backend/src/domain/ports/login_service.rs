//! Driving port for login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for an API token without knowing the backing
//! infrastructure, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller's API token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;
}
