use super::errors::BearerError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-sensitively. A bare `"Bearer "` yields an empty token;
/// rejecting it is left to token validation.
///
/// # Arguments
/// * `header_value` - Raw header value
///
/// # Returns
/// Token string slice following the prefix
///
/// # Errors
/// * `Missing` - Header value is empty
/// * `InvalidFormat` - Header does not start with `Bearer `
pub fn extract_bearer(header_value: &str) -> Result<&str, BearerError> {
    if header_value.is_empty() {
        return Err(BearerError::Missing);
    }

    header_value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_empty_token_is_accepted() {
        assert_eq!(extract_bearer("Bearer "), Ok(""));
    }

    #[test]
    fn test_extract_empty_header() {
        assert_eq!(extract_bearer(""), Err(BearerError::Missing));
    }

    #[test]
    fn test_extract_wrong_scheme() {
        assert_eq!(extract_bearer("Basic xyz"), Err(BearerError::InvalidFormat));
    }

    #[test]
    fn test_extract_without_separator() {
        assert_eq!(extract_bearer("Bearer"), Err(BearerError::InvalidFormat));
        assert_eq!(extract_bearer("Bearerabc"), Err(BearerError::InvalidFormat));
    }

    #[test]
    fn test_extract_scheme_is_case_sensitive() {
        assert_eq!(
            extract_bearer("bearer abc"),
            Err(BearerError::InvalidFormat)
        );
    }
}
