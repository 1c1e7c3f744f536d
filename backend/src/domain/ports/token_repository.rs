//! Driven port for persisting issued API tokens.
//!
//! Each user holds at most one token. Login returns the existing token when
//! present and stores a new one otherwise.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by token repository adapters.
    pub enum TokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "token repository connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } =>
            "token repository query failed: {message}",
    }
}

/// Port for token lookup and storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Token currently issued to `user_id`, if any.
    async fn token_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthToken>, TokenRepositoryError>;

    /// Record `token` as the token for `user_id`.
    async fn store(
        &self,
        user_id: &UserId,
        token: &AuthToken,
        issued_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    /// User owning `token`, if it was issued.
    async fn resolve(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError>;
}

#[derive(Debug, Default)]
struct TokenTable {
    by_user: HashMap<UserId, (AuthToken, DateTime<Utc>)>,
    by_token: HashMap<AuthToken, UserId>,
}

/// Token store held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenRepository {
    table: Arc<RwLock<TokenTable>>,
}

impl InMemoryTokenRepository {
    fn poisoned() -> TokenRepositoryError {
        TokenRepositoryError::connection("token store lock poisoned")
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn token_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthToken>, TokenRepositoryError> {
        let guard = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(guard.by_user.get(user_id).map(|(token, _)| token.clone()))
    }

    async fn store(
        &self,
        user_id: &UserId,
        token: &AuthToken,
        issued_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        let mut guard = self.table.write().map_err(|_| Self::poisoned())?;
        if let Some((previous, _)) = guard
            .by_user
            .insert(user_id.clone(), (token.clone(), issued_at))
        {
            guard.by_token.remove(&previous);
        }
        guard.by_token.insert(token.clone(), user_id.clone());
        Ok(())
    }

    async fn resolve(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError> {
        let guard = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(guard.by_token.get(token).cloned())
    }
}
