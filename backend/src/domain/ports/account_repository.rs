//! Driven port for looking up login accounts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "account repository query failed: {message}",
    }
}

/// Login account as stored: owning user plus a PHC-format password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    /// User the account logs in as.
    pub user_id: UserId,
    /// Argon2 hash of the password.
    pub password_hash: String,
}

/// Port for resolving usernames to stored accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch the account registered under `username`.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;
}

/// Account store held in memory, keyed by username.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, StoredAccount>>>,
}

impl InMemoryAccountRepository {
    /// Seed the store with `(username, account)` pairs.
    pub fn new(accounts: impl IntoIterator<Item = (String, StoredAccount)>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts.into_iter().collect())),
        }
    }

    /// Register or replace the account stored under `username`.
    pub fn insert(
        &self,
        username: impl Into<String>,
        account: StoredAccount,
    ) -> Result<(), AccountRepositoryError> {
        let mut guard = self
            .accounts
            .write()
            .map_err(|_| AccountRepositoryError::connection("account store lock poisoned"))?;
        guard.insert(username.into(), account);
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError> {
        let guard = self
            .accounts
            .read()
            .map_err(|_| AccountRepositoryError::connection("account store lock poisoned"))?;
        Ok(guard.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn usernames_are_matched_exactly() {
        let account = StoredAccount {
            user_id: UserId::random(),
            password_hash: "$argon2id$stub".to_owned(),
        };
        let repository = InMemoryAccountRepository::default();
        repository.insert("jdoe", account.clone()).expect("insert");

        assert_eq!(
            repository.find_credentials("jdoe").await.expect("read"),
            Some(account)
        );
        assert!(
            repository
                .find_credentials("JDOE")
                .await
                .expect("read")
                .is_none()
        );
    }
}
