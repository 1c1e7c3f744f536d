//! PostgreSQL-backed `UserProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserProfileRepository, UserProfileRepositoryError};
use crate::domain::{UserId, UserProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_profiles;

/// Diesel-backed implementation of the user profile repository port.
#[derive(Clone)]
pub struct DieselUserProfileRepository {
    pool: DbPool,
}

impl DieselUserProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserProfileRepositoryError {
    map_basic_pool_error(error, |message| {
        UserProfileRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> UserProfileRepositoryError {
    map_basic_diesel_error(
        error,
        UserProfileRepositoryError::query,
        UserProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: UserProfileRow) -> UserProfile {
    let UserProfileRow {
        user_id,
        full_name,
        district,
        borough,
    } = row;
    UserProfile::new(UserId::from_uuid(user_id), full_name, district, borough)
}

#[async_trait]
impl UserProfileRepository for DieselUserProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.as_uuid()))
            .select(UserProfileRow::as_select())
            .first::<UserProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_profile))
    }
}
