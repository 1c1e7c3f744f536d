//! Driven port for loading council-office profiles.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum UserProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user profile repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "user profile repository query failed: {message}",
    }
}

/// Port for reading the profile linked to a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Fetch the profile for `user_id`, if one was provisioned.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError>;
}

/// Profile store held in memory, keyed by user id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryUserProfileRepository {
    /// Seed the store, keyed by each profile's user.
    pub fn new(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let by_user = profiles
            .into_iter()
            .map(|profile| (profile.user_id().clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(by_user)),
        }
    }

    /// Insert or replace the profile for its user.
    pub fn upsert(&self, profile: UserProfile) -> Result<(), UserProfileRepositoryError> {
        let mut guard = self
            .profiles
            .write()
            .map_err(|_| UserProfileRepositoryError::connection("profile store lock poisoned"))?;
        guard.insert(profile.user_id().clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let guard = self
            .profiles
            .read()
            .map_err(|_| UserProfileRepositoryError::connection("profile store lock poisoned"))?;
        Ok(guard.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn returns_profile_only_for_known_user() {
        let known = UserId::random();
        let repository = InMemoryUserProfileRepository::new([UserProfile::new(
            known.clone(),
            "Jane Doe",
            "1",
            "Manhattan",
        )]);

        let found = repository.find_by_user(&known).await.expect("read");
        let missing = repository
            .find_by_user(&UserId::random())
            .await
            .expect("read");

        assert_eq!(found.map(|p| p.full_name().to_owned()), Some("Jane Doe".to_owned()));
        assert!(missing.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_existing_profile() {
        let user = UserId::random();
        let repository = InMemoryUserProfileRepository::default();
        repository
            .upsert(UserProfile::new(user.clone(), "Jane Doe", "1", "Manhattan"))
            .expect("insert");
        repository
            .upsert(UserProfile::new(user.clone(), "Jane Doe", "4", "Manhattan"))
            .expect("replace");

        let found = repository
            .find_by_user(&user)
            .await
            .expect("read")
            .expect("profile present");
        assert_eq!(found.district().to_string(), "4");
    }
}
