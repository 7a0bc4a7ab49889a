pub mod bearer;
pub mod claims;
pub mod codec;
pub mod errors;

pub use bearer::extract_bearer;
pub use claims::SessionClaims;
pub use codec::TokenCodec;
pub use codec::DEFAULT_TOKEN_TTL_HOURS;
pub use errors::BearerError;
pub use errors::JwtError;
