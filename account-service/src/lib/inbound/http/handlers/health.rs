use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::account::models::StoreStats;
use crate::account::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn health<CS: CredentialServicePort>(
    State(state): State<AppState<CS>>,
) -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            db_stats: state.credential_service.store_stats().map(Into::into),
        },
    )
}

pub async fn ping() -> ApiSuccess<PingResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        PingResponseData {
            message: "pong".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Absent (`null`) when the account store keeps no connection pool.
    pub db_stats: Option<DbStatsData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStatsData {
    pub max_open_connections: u32,
    pub open_connections: u32,
    pub in_use: u32,
    pub idle: u32,
}

impl From<StoreStats> for DbStatsData {
    fn from(stats: StoreStats) -> Self {
        Self {
            max_open_connections: stats.max_connections,
            open_connections: stats.open_connections,
            in_use: stats.in_use,
            idle: stats.idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingResponseData {
    pub message: String,
}
