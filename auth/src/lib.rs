//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (bcrypt)
//! - Session token issuance and validation (JWT, HS256)
//! - Bearer header extraction and the request gate
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4);
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue(42, "alice@example.com", "alice").unwrap();
//! let claims = codec.validate(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").with_password_cost(4);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, 42, "alice@example.com", "alice")
//!     .unwrap();
//!
//! // Protected request: gate on the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! let claims = auth.authorize(Some(&header)).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::AuthorizationError;
pub use jwt::extract_bearer;
pub use jwt::BearerError;
pub use jwt::JwtError;
pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
