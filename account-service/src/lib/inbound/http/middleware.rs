use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use auth::AuthorizationError;

use super::handlers::ApiError;
use crate::account::models::AuthenticatedAccount;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

/// Gate for protected routes: verifies the bearer token and stores the resolved
/// [`AuthenticatedAccount`] in the request extensions.
pub async fn authenticate<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthorizationError::InvalidTokenFormat)?,
        ),
        None => None,
    };

    let claims = state.authenticator.authorize(header).map_err(|e| {
        tracing::warn!(error = %e, "Rejected request to protected route");
        e
    })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount::from(claims));

    Ok(next.run(req).await)
}
