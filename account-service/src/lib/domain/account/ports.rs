use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthenticatedSession;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::StoreStats;

/// Port for credential operations consumed by the HTTP layer.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Email, username, password and its confirmation
    ///
    /// # Returns
    /// Created account with a session token
    ///
    /// # Errors
    /// * `PasswordMismatch` - Confirmation differs from password
    /// * `InvalidUsername` - Username contains characters outside `[A-Za-z0-9_]`
    /// * `AccountExists` - Email or username is already taken
    /// * `StoreUnavailable` - Account store failed
    /// * `HashingFailed` - Password could not be hashed (too long)
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `command` - Email and password
    ///
    /// # Returns
    /// Account with a session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password or store failure
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `AccountNotFound` - Account does not exist or store failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Connection usage of the underlying store, if it keeps a pool.
    fn store_stats(&self) -> Option<StoreStats>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Arguments
    /// * `account` - Account data; the store assigns identifier and timestamps
    ///
    /// # Returns
    /// Stored account entity
    ///
    /// # Errors
    /// * `UniqueViolation` - Email or username is already taken
    /// * `Database` - Database operation failed
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Retrieve account by email address (exact match).
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Check whether any account uses the given email or the given username.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn exists(&self, email: &str, username: &str) -> Result<bool, StoreError>;

    /// Connection pool usage; `None` for stores without a pool.
    fn stats(&self) -> Option<StoreStats>;
}
