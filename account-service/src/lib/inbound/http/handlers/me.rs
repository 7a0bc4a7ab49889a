use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::AuthenticatedAccount;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn me<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    Extension(identity): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    state
        .credential_service
        .get_account(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(
                StatusCode::OK,
                MeResponseData {
                    user: account.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: AccountData,
}
