use super::errors::PasswordError;

/// Work factor used when no explicit cost is configured.
pub const DEFAULT_COST: u32 = 12;

/// Bcrypt only consumes the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing implementation.
///
/// Provides salted one-way hashing (internally uses bcrypt). The cost factor is
/// embedded in every produced hash, so raising it later keeps old hashes verifiable.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance configured with cost 12
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `cost` - Bcrypt cost (4 to 31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash (may be empty)
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt><digest>`)
    ///
    /// # Errors
    /// * `InputTooLong` - Password exceeds 72 bytes
    /// * `HashingFailed` - Underlying hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let actual = password.len();
        if actual > MAX_PASSWORD_BYTES {
            return Err(PasswordError::InputTooLong {
                max: MAX_PASSWORD_BYTES,
                actual,
            });
        }

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison itself is constant-time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `Malformed` - Stored hash is not a well-formed bcrypt string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::Malformed(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
