use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::StoreStats;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store.
///
/// Mirrors the Postgres schema constraints: sequential identifiers starting at 1 and
/// case-sensitive uniqueness of both email and username.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.state.read().await.accounts.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        // Check and insert under one write lock so concurrent creates cannot both win
        let mut state = self.state.write().await;

        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }
        if state.accounts.values().any(|a| a.username == account.username) {
            return Err(StoreError::UniqueViolation(
                "users_username_key".to_string(),
            ));
        }

        state.next_id += 1;
        let now = Utc::now();
        let stored = Account {
            id: AccountId(state.next_id),
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            learning_level: account.learning_level,
            avatar_url: account.avatar_url,
            created_at: now,
            updated_at: now,
        };
        state.accounts.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;
        Ok(state.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(id).cloned())
    }

    async fn exists(&self, email: &str, username: &str) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .any(|a| a.email == email || a.username == username))
    }

    fn stats(&self) -> Option<StoreStats> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str, username: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            learning_level: 1,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repository = InMemoryAccountRepository::new();

        let first = repository.create(new_account("a@x.com", "alice")).await.unwrap();
        let second = repository.create(new_account("b@x.com", "bob")).await.unwrap();

        assert_eq!(first.id, AccountId(1));
        assert_eq!(second.id, AccountId(2));
        assert_eq!(first.created_at, first.updated_at);
        assert_eq!(repository.len().await, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com", "alice")).await.unwrap();

        let result = repository.create(new_account("a@x.com", "other")).await;
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation("users_email_key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com", "alice")).await.unwrap();

        let result = repository.create(new_account("b@x.com", "alice")).await;
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation("users_username_key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let repository = InMemoryAccountRepository::new();
        repository.create(new_account("a@x.com", "alice")).await.unwrap();

        assert!(repository.find_by_email("A@x.com").await.unwrap().is_none());
        assert!(!repository.exists("A@x.com", "Alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_and_exists() {
        let repository = InMemoryAccountRepository::new();
        let created = repository.create(new_account("a@x.com", "alice")).await.unwrap();

        assert_eq!(
            repository.find_by_email("a@x.com").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            repository.find_by_id(&created.id).await.unwrap(),
            Some(created)
        );
        assert!(repository.find_by_id(&AccountId(42)).await.unwrap().is_none());

        assert!(repository.exists("a@x.com", "nobody").await.unwrap());
        assert!(repository.exists("nobody@x.com", "alice").await.unwrap());
        assert!(!repository.exists("nobody@x.com", "nobody").await.unwrap());
    }

    #[test]
    fn test_reports_no_pool_stats() {
        assert!(InMemoryAccountRepository::new().stats().is_none());
    }
}
