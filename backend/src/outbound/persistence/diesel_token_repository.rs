//! PostgreSQL-backed `TokenRepository` implementation using Diesel ORM.
//!
//! `auth_tokens.user_id` is unique, so storing a token for a user that
//! already holds one replaces it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TokenRepository, TokenRepositoryError};
use crate::domain::{AuthToken, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewAuthTokenRow;
use super::pool::{DbPool, PoolError};
use super::schema::auth_tokens;

/// Diesel-backed implementation of the token repository port.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TokenRepositoryError {
    map_basic_pool_error(error, |message| TokenRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> TokenRepositoryError {
    map_basic_diesel_error(
        error,
        TokenRepositoryError::query,
        TokenRepositoryError::connection,
    )
}

fn decode_token(raw: String) -> Result<AuthToken, TokenRepositoryError> {
    AuthToken::parse(&raw)
        .map_err(|err| TokenRepositoryError::query(format!("stored token is invalid: {err}")))
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn token_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AuthToken>, TokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let key = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id.as_uuid()))
            .select(auth_tokens::key)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        key.map(decode_token).transpose()
    }

    async fn store(
        &self,
        user_id: &UserId,
        token: &AuthToken,
        issued_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAuthTokenRow {
            key: token.as_str(),
            user_id: *user_id.as_uuid(),
            created_at: issued_at,
        };

        diesel::insert_into(auth_tokens::table)
            .values(&row)
            .on_conflict(auth_tokens::user_id)
            .do_update()
            .set((
                auth_tokens::key.eq(excluded(auth_tokens::key)),
                auth_tokens::created_at.eq(excluded(auth_tokens::created_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn resolve(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user = auth_tokens::table
            .filter(auth_tokens::key.eq(token.as_str()))
            .select(auth_tokens::user_id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(user.map(UserId::from_uuid))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stored_tokens_must_be_hex() {
        let err = decode_token("not hex".to_owned()).expect_err("invalid token");
        assert!(matches!(err, TokenRepositoryError::Query { .. }));
    }

    #[rstest]
    fn stored_tokens_round_trip() {
        let token = decode_token("abc123".to_owned()).expect("valid token");
        assert_eq!(token.as_str(), "abc123");
    }
}
