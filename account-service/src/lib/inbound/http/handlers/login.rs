use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::SessionData;
use crate::account::models::check_password_policy;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let Json(body) = payload?;

    state
        .credential_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = errors.check("email", EmailAddress::new(self.email));
        errors.check("password", check_password_policy(&self.password));

        match email {
            Some(email) if errors.is_empty() => {
                Ok(LoginCommand::new(email.into_inner(), self.password))
            }
            _ => Err(errors),
        }
    }
}
