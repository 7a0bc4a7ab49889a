use chrono::Duration;

use crate::jwt::extract_bearer;
use crate::jwt::BearerError;
use crate::jwt::JwtError;
use crate::jwt::SessionClaims;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Holds only read-only state, so a single instance is shared across all requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

/// Reasons a request is refused by [`Authenticator::authorize`].
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authorization header is required")]
    MissingToken,

    #[error("Invalid authorization header format")]
    InvalidTokenFormat,

    #[error("Token is invalid or expired")]
    InvalidToken,
}

impl From<BearerError> for AuthorizationError {
    fn from(err: BearerError) -> Self {
        match err {
            BearerError::Missing => AuthorizationError::MissingToken,
            BearerError::InvalidFormat => AuthorizationError::InvalidTokenFormat,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    ///
    /// # Returns
    /// Authenticator with bcrypt cost 12 and 24 hour tokens
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret),
        }
    }

    /// Override the bcrypt work factor used for new hashes.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_hasher = PasswordHasher::with_cost(cost);
        self
    }

    /// Override the lifetime of issued tokens.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_codec = self.token_codec.with_ttl(ttl);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `InputTooLong` - Password exceeds 72 bytes
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Account identifier to embed
    /// * `email` - Account email to embed
    /// * `username` - Account username to embed
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        email: &str,
        username: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(user_id, email, username)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, when the caller has just chosen the password.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        user_id: i64,
        email: &str,
        username: &str,
    ) -> Result<String, JwtError> {
        self.token_codec.issue(user_id, email, username)
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation failed for any reason
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.token_codec.validate(token)
    }

    /// Request gate: resolve the identity carried by an `Authorization` header.
    ///
    /// Never consults account storage; a validly signed, unexpired token is accepted
    /// even if the account changed after issuance.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, if the header was sent
    ///
    /// # Returns
    /// Verified session claims
    ///
    /// # Errors
    /// * `MissingToken` - Header absent or empty
    /// * `InvalidTokenFormat` - Header is not `Bearer <token>`
    /// * `InvalidToken` - Bad signature, wrong algorithm or expired
    pub fn authorize(&self, authorization: Option<&str>) -> Result<SessionClaims, AuthorizationError> {
        let header_value = authorization.ok_or(AuthorizationError::MissingToken)?;
        let token = extract_bearer(header_value)?;

        self.token_codec
            .validate(token)
            .map_err(|_| AuthorizationError::InvalidToken)
    }
}
