use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Returns service status and version. `db_healthy` reflects a `SELECT 1`
/// round trip; the endpoint itself always answers 200.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let db_healthy = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Health check could not reach the database: {e}");
            false
        }
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "db_healthy": db_healthy
    }))
}
