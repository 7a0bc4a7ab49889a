use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::errors::StoreError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthenticatedSession;
use crate::account::models::LoginCommand;
use crate::account::models::NewAccount;
use crate::account::models::RegisterCommand;
use crate::account::models::StoreStats;
use crate::account::models::DEFAULT_LEARNING_LEVEL;
use crate::account::ports::AccountRepository;
use crate::account::ports::CredentialServicePort;

/// Domain service implementation for registration and login.
///
/// Stateless apart from its injected collaborators; every call either completes and
/// issues a token or fails with a single `AccountError`.
pub struct CredentialService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> CredentialService<AR>
where
    AR: AccountRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_session(&self, account: Account) -> Result<AuthenticatedSession, AccountError> {
        let token = self
            .authenticator
            .issue_token(account.id.as_i64(), &account.email, &account.username)
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;

        Ok(AuthenticatedSession { account, token })
    }
}

/// Authoritative username charset: ASCII letters, digits and underscore.
fn has_valid_username_charset(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl<AR> CredentialServicePort for CredentialService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedSession, AccountError> {
        if command.password != command.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        if !has_valid_username_charset(&command.username) {
            return Err(AccountError::InvalidUsername);
        }

        let taken = self
            .repository
            .exists(&command.email, &command.username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Account existence check failed");
                AccountError::StoreUnavailable(e.to_string())
            })?;
        if taken {
            return Err(AccountError::AccountExists);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::HashingFailed(e.to_string()))?;

        let new_account = NewAccount {
            email: command.email,
            username: command.username,
            password_hash,
            learning_level: DEFAULT_LEARNING_LEVEL,
            avatar_url: None,
        };

        let account = self
            .repository
            .create(new_account)
            .await
            .map_err(|e| match e {
                // Lost a race against a concurrent registration
                StoreError::UniqueViolation(_) => AccountError::AccountExists,
                StoreError::Database(msg) => {
                    tracing::error!(error = %msg, "Account creation failed");
                    AccountError::StoreUnavailable(msg)
                }
            })?;

        tracing::info!(account_id = %account.id, "Account registered");

        self.issue_session(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AccountError> {
        let account = match self.repository.find_by_email(&command.email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!("Login rejected: unknown email");
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login rejected: account lookup failed");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let result = self.authenticator.authenticate(
            &command.password,
            &account.password_hash,
            account.id.as_i64(),
            &account.email,
            &account.username,
        );

        match result {
            Ok(result) => {
                tracing::info!(account_id = %account.id, "Account logged in");
                Ok(AuthenticatedSession {
                    account,
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::JwtError(e)) => Err(AccountError::TokenIssuance(e.to_string())),
            Err(e) => {
                tracing::debug!(account_id = %account.id, reason = %e, "Login rejected");
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        match self.repository.find_by_id(id).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(AccountError::AccountNotFound),
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Account lookup failed");
                Err(AccountError::AccountNotFound)
            }
        }
    }

    fn store_stats(&self) -> Option<StoreStats> {
        self.repository.stats()
    }
}
