//! Driving port resolving presented API tokens to users.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, UserId};

/// Domain use-case port used by the HTTP authentication extractor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Return the owning user, or `None` when the token was never issued.
    async fn authenticate(&self, token: &AuthToken) -> Result<Option<UserId>, Error>;
}
