use crate::server::router::ItemdeskState;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use chrono::{SecondsFormat, Utc};
use itemdesk_schema::{HealthResponse, HealthStatus};
use tracing::error;

pub fn router() -> Router<ItemdeskState> {
    Router::new().route("/health", get(health_handler))
}

/// GET /health
///
/// Liveness probe: healthy only if the database answers a trivial query.
async fn health_handler(State(state): State<ItemdeskState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    match state.items.ping().await {
        Ok(db_time) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: HealthStatus::Ok,
                message: "Database connection successful".to_string(),
                timestamp,
                db_time: Some(db_time),
            }),
        ),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: HealthStatus::Error,
                    message: "Database connection failed".to_string(),
                    timestamp,
                    db_time: None,
                }),
            )
        }
    }
}
