use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried inside a session token.
///
/// The signed token is the whole session: no server-side state backs it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Account identifier
    pub user_id: i64,

    pub email: String,

    pub username: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl SessionClaims {
    /// Create claims issued now and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier
    /// * `email` - Account email
    /// * `username` - Account username
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with iat set to now and exp set to now + ttl
    pub fn new(user_id: i64, email: String, username: String, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            user_id,
            email,
            username,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is no longer valid at its expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
