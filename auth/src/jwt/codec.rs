use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::JwtError;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Session token codec for issuing and validating tokens.
///
/// Tokens are compact JWS strings (`header.claims.signature`, base64url) signed with
/// HS256 under a process-wide secret handed in at construction.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a new token codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// TokenCodec configured with HS256 and a 24 hour token lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lifetime of issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for an account.
    ///
    /// # Arguments
    /// * `user_id` - Account identifier
    /// * `email` - Account email
    /// * `username` - Account username
    ///
    /// # Returns
    /// Signed token string, valid until now + ttl
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: i64, email: &str, username: &str) -> Result<String, JwtError> {
        let claims = SessionClaims::new(user_id, email.to_string(), username.to_string(), self.ttl);
        self.encode(&claims)
    }

    /// Sign the given claims as-is.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Rejects tokens whose header names any algorithm other than HS256, whose
    /// signature does not verify, or whose expiry is at or before the current second.
    ///
    /// # Arguments
    /// * `token` - Token string to validate
    ///
    /// # Returns
    /// Verified session claims
    ///
    /// # Errors
    /// * `InvalidToken` - Any parse, algorithm, signature or expiry failure
    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(reason = %e, "Token rejected");
                JwtError::InvalidToken
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            tracing::debug!(reason = "expired", "Token rejected");
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn tamper_signature(token: &str) -> String {
        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        let index = signature_start + 5;
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .issue(42, "a@x.com", "alice")
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.validate(&token).expect("Failed to validate token");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, claims.iat + 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at_is_now() {
        let codec = TokenCodec::new(SECRET);
        let before = Utc::now().timestamp();

        let token = codec.issue(1, "a@x.com", "alice").unwrap();
        let claims = codec.validate(&token).unwrap();

        let after = Utc::now().timestamp();
        assert!(claims.iat >= before && claims.iat <= after);
    }

    #[test]
    fn test_custom_ttl() {
        let codec = TokenCodec::new(SECRET).with_ttl(Duration::hours(1));
        assert_eq!(codec.ttl(), Duration::hours(1));

        let token = codec.issue(1, "a@x.com", "alice").unwrap();
        let claims = codec.validate(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_validate_tampered_signature() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(42, "a@x.com", "alice").unwrap();

        let result = codec.validate(&tamper_signature(&token));
        assert_eq!(result, Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_tampered_claims() {
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(42, "a@x.com", "alice").unwrap();
        let other = codec.issue(43, "b@x.com", "bob").unwrap();

        // Splice the claims of one token onto the signature of another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert_eq!(codec.validate(&forged), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_expired_token() {
        let codec = TokenCodec::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            user_id: 42,
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            exp: now - 10,
            iat: now - 24 * 60 * 60,
        };

        let token = codec.encode(&claims).unwrap();
        assert_eq!(codec.validate(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_token_expiring_now() {
        let codec = TokenCodec::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            user_id: 42,
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            exp: now,
            iat: now - 60,
        };

        let token = codec.encode(&claims).unwrap();
        assert_eq!(codec.validate(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1.issue(42, "a@x.com", "alice").unwrap();

        assert_eq!(codec2.validate(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_rejects_other_algorithm() {
        let codec = TokenCodec::new(SECRET);
        let claims = SessionClaims::new(
            42,
            "a@x.com".to_string(),
            "alice".to_string(),
            Duration::hours(24),
        );

        // Same secret, different HMAC variant
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(codec.validate(&token), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_garbage() {
        let codec = TokenCodec::new(SECRET);

        assert_eq!(
            codec.validate("invalid.token.here"),
            Err(JwtError::InvalidToken)
        );
        assert_eq!(codec.validate(""), Err(JwtError::InvalidToken));
    }

    #[test]
    fn test_validate_token_missing_identity_claims() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }

        let codec = TokenCodec::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "42".to_string(),
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(codec.validate(&token), Err(JwtError::InvalidToken));
    }
}
