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
use crate::account::models::RegisterCommand;
use crate::account::models::Username;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let Json(body) = payload?;

    state
        .credential_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = errors.check("email", EmailAddress::new(self.email));
        let username = errors.check("username", Username::new(self.username));
        errors.check("password", check_password_policy(&self.password));
        if self.confirm_password.is_empty() {
            errors.add("confirm_password", "Password confirmation is required");
        }

        match (email, username) {
            (Some(email), Some(username)) if errors.is_empty() => Ok(RegisterCommand::new(
                email.into_inner(),
                username.into_inner(),
                self.password,
                self.confirm_password,
            )),
            _ => Err(errors),
        }
    }
}
