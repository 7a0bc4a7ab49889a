use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::UsernameError;

/// Learning level assigned to every newly registered account.
pub const DEFAULT_LEARNING_LEVEL: i32 = 1;

/// Connection usage of the account store, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub max_connections: u32,
    pub open_connections: u32,
    pub in_use: u32,
    pub idle: u32,
}

/// Account aggregate entity.
///
/// Owned by the account store; identifier and timestamps are assigned there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub learning_level: i32,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account data handed to the store for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub learning_level: i32,
    pub avatar_url: Option<String>,
}

/// Username value type
///
/// Field-level form constraint: 2-20 ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 20;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 2 characters
    /// * `TooLong` - Username longer than 20 characters
    /// * `InvalidCharacters` - Contains anything but ASCII letters and digits
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Minimum plaintext password length accepted by the forms.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a plaintext password against the form policy.
///
/// # Errors
/// * `TooShort` - Fewer than 8 characters
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual,
        });
    }
    Ok(())
}

/// Command to register a new account.
///
/// Carries raw input; the credential service enforces its own invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCommand {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterCommand {
    pub fn new(email: String, username: String, password: String, confirm_password: String) -> Self {
        Self {
            email,
            username,
            password,
            confirm_password,
        }
    }
}

/// Command to log in with email and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

/// Outcome of a successful register or login: the account plus its session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account: Account,
    pub token: String,
}

/// Identity resolved from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: String,
    pub username: String,
}

impl From<auth::SessionClaims> for AuthenticatedAccount {
    fn from(claims: auth::SessionClaims) -> Self {
        Self {
            account_id: AccountId(claims.user_id),
            email: claims.email,
            username: claims.username,
        }
    }
}
