use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/files", get(list_files))
        .route("/download/{filename}", get(download_audio))
        .route("/static/audio/{filename}", get(serve_audio))
}

/// Only filenames this server itself generated are ever touched on disk:
/// a single path segment of the form `tts_audio_*.wav`.
pub fn is_generated_audio_name(name: &str) -> bool {
    name.starts_with("tts_audio_")
        && name.ends_with(".wav")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

async fn list_files(State(state): State<AppState>) -> Response {
    let mut entries = match tokio::fs::read_dir(&state.config.audio_dir).await {
        Ok(e) => e,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let mut files: Vec<String> = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        if let Ok(name) = entry.file_name().into_string() {
            if is_generated_audio_name(&name) {
                files.push(name);
            }
        }
    }

    // Timestamped names, so lexicographic descending is newest first.
    files.sort_by(|a, b| b.cmp(a));

    Json(json!({ "files": files })).into_response()
}

async fn download_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    serve_file(&state, &filename, true).await
}

async fn serve_audio(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    serve_file(&state, &filename, false).await
}

async fn serve_file(state: &AppState, filename: &str, attachment: bool) -> Response {
    if !is_generated_audio_name(filename) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "File not found" })),
        )
            .into_response();
    }

    let path = std::path::Path::new(&state.config.audio_dir).join(filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "File not found" })),
            )
                .into_response();
        }
    };

    if attachment {
        (
            [
                (header::CONTENT_TYPE, "audio/wav".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response()
    } else {
        ([(header::CONTENT_TYPE, "audio/wav")], bytes).into_response()
    }
}
