//! Token login service.
//!
//! Exchanges a username and password for the user's API token. Each user
//! owns a single token: the first successful login issues it and later logins
//! return the same value. The same service resolves presented tokens back to
//! users for the HTTP authentication extractor.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::ports::{
    AccountRepository, AccountRepositoryError, LoginService, TokenAuthenticator, TokenRepository,
    TokenRepositoryError,
};
use super::{AuthToken, Error, LoginCredentials, UserId, verify_password};

/// Message returned for any rejected credential pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Unable to log in with provided credentials.";

/// Login and token authentication backed by account and token repositories.
pub struct TokenLoginService<A, T> {
    accounts: Arc<A>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<A, T> Clone for TokenLoginService<A, T> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, T> TokenLoginService<A, T> {
    /// Create a new service with the given repositories and clock.
    pub fn new(accounts: Arc<A>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            tokens,
            clock,
        }
    }
}

impl<A, T> TokenLoginService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    fn map_account_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
        }
    }

    fn map_token_error(error: TokenRepositoryError) -> Error {
        match error {
            TokenRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("token repository unavailable: {message}"))
            }
            TokenRepositoryError::Query { message } => {
                Error::internal(format!("token repository error: {message}"))
            }
        }
    }

    async fn verified_user(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .accounts
            .find_credentials(credentials.username())
            .await
            .map_err(Self::map_account_error)?;
        let Some(account) = account else {
            warn!(username = credentials.username(), "login for unknown account");
            return Err(Error::invalid_request(INVALID_CREDENTIALS_MESSAGE));
        };
        let matches = verify_password(credentials.password(), &account.password_hash)
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !matches {
            warn!(username = credentials.username(), "login with wrong password");
            return Err(Error::invalid_request(INVALID_CREDENTIALS_MESSAGE));
        }
        Ok(account.user_id)
    }

    async fn token_for(&self, user_id: &UserId) -> Result<AuthToken, Error> {
        if let Some(existing) = self
            .tokens
            .token_for_user(user_id)
            .await
            .map_err(Self::map_token_error)?
        {
            return Ok(existing);
        }
        let token = AuthToken::generate(&mut rand::thread_rng());
        self.tokens
            .store(user_id, &token, self.clock.utc())
            .await
            .map_err(Self::map_token_error)?;
        info!(
            user_id = %user_id,
            token = %token.fingerprint(),
            "issued api token"
        );
        Ok(token)
    }
}

#[async_trait]
impl<A, T> LoginService for TokenLoginService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let user_id = self.verified_user(credentials).await?;
        self.token_for(&user_id).await
    }
}

#[async_trait]
impl<A, T> TokenAuthenticator for TokenLoginService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    async fn authenticate(&self, token: &AuthToken) -> Result<Option<UserId>, Error> {
        self.tokens
            .resolve(token)
            .await
            .map_err(Self::map_token_error)
    }
}
