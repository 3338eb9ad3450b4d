/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "total_connections": 1, "idle_connections": 1 }
/// }
/// ```
///
/// A store that does not answer turns the status into `"degraded"`; the
/// endpoint itself still answers 200 so load balancers can read the body.

use crate::app::AppState;
use axum::{extract::State, Json};
use lodge_shared::db::pool::{get_pool_stats, health_check as ping_database};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub pool: PoolHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolHealth {
    pub total_connections: usize,
    pub idle_connections: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match ping_database(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let stats = get_pool_stats(&state.db);

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: lodge_shared::VERSION.to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: PoolHealth {
            total_connections: stats.total_connections,
            idle_connections: stats.idle_connections,
        },
    })
}
