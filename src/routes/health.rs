use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    // The audio directory is the only local resource we depend on.
    let audio_dir_status = match tokio::fs::metadata(&state.config.audio_dir).await {
        Ok(meta) if meta.is_dir() => "ok",
        _ => "error",
    };

    let status = if audio_dir_status == "ok" { "ok" } else { "degraded" };
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(json!({
            "status": status,
            "audio_dir": audio_dir_status,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
