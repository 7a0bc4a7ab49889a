use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::account::models::AuthenticatedAccount;

/// Tokens are not tracked server-side, so logging out only acknowledges the request;
/// the client discards its token.
pub async fn logout(
    Extension(identity): Extension<AuthenticatedAccount>,
) -> ApiSuccess<LogoutResponseData> {
    tracing::info!(account_id = %identity.account_id, "Account logged out");

    ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
