//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{AccountRepository, AccountRepositoryError, StoredAccount};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::AccountCredentialsRow;
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, |message| AccountRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = accounts::table
            .filter(accounts::username.eq(username))
            .select(AccountCredentialsRow::as_select())
            .first::<AccountCredentialsRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|row| StoredAccount {
            user_id: UserId::from_uuid(row.user_id),
            password_hash: row.password_hash,
        }))
    }
}
