use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::health::ping;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::CredentialServicePort;

pub struct AppState<CS: CredentialServicePort> {
    pub credential_service: Arc<CS>,
    pub authenticator: Arc<Authenticator>,
}

// Manual impl: deriving would require `CS: Clone`.
impl<CS: CredentialServicePort> Clone for AppState<CS> {
    fn clone(&self) -> Self {
        Self {
            credential_service: Arc::clone(&self.credential_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<CS: CredentialServicePort>(
    credential_service: Arc<CS>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        credential_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register::<CS>))
        .route("/api/v1/auth/login", post(login::<CS>))
        .route("/api/v1/ping", get(ping))
        .route("/health", get(health::<CS>));

    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/me", get(me::<CS>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<CS>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
