use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::services::audio::{synthesize_fallback_tone, write_wav};
use crate::services::gemini::{self, SpeechResult};
use crate::services::keywords::extract_keywords;
use crate::services::prompt::build_prompt;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate_audio))
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

/// Run the full pipeline: prompt -> script -> keywords -> speech -> WAV on
/// disk. TTS failure is absorbed by substituting the local fallback tone;
/// script generation failure is not.
async fn generate_audio(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let config = &state.config;
    let prompt = build_prompt(req.custom_prompt.as_deref());

    let script =
        match gemini::generate_script(&config.gemini_api_key, &config.text_model, &prompt).await {
            Ok(s) => s,
            Err(e) => {
                return (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "success": false, "error": e })),
                )
                    .into_response();
            }
        };

    let keywords = extract_keywords(&script, config.keyword_limit);

    let speech = gemini::synthesize_speech(
        &config.gemini_api_key,
        &config.tts_model,
        &config.tts_voice,
        &script,
    )
    .await;

    let (wav, fallback) = match speech {
        SpeechResult::Synthesized(pcm) => {
            match write_wav(&pcm.data, 1, pcm.sample_rate, 2) {
                Ok(wav) => (wav, false),
                Err(e) => {
                    tracing::error!("TTS audio could not be packaged: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "success": false, "error": "Audio packaging failed" })),
                    )
                        .into_response();
                }
            }
        }
        SpeechResult::Unavailable(reason) => {
            tracing::warn!("TTS unavailable ({}), synthesizing fallback tone", reason);
            match synthesize_fallback_tone(&script) {
                Ok(wav) => (wav, true),
                Err(e) => {
                    tracing::error!("Fallback synthesis failed: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "success": false, "error": "Audio synthesis failed" })),
                    )
                        .into_response();
                }
            }
        }
    };

    let filename = generate_filename();
    let path = std::path::Path::new(&config.audio_dir).join(&filename);
    if let Err(e) = tokio::fs::write(&path, &wav).await {
        tracing::error!("Failed to write {}: {}", path.display(), e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "Failed to store audio file" })),
        )
            .into_response();
    }

    // Keyword side file next to the audio; failure here is not fatal.
    let keywords_path = path.with_extension("keywords.txt");
    if let Err(e) = tokio::fs::write(&keywords_path, render_keywords_file(&keywords)).await {
        tracing::warn!("Failed to write {}: {}", keywords_path.display(), e);
    }

    tracing::info!(
        "Generated {} ({} bytes, fallback={})",
        filename,
        wav.len(),
        fallback
    );

    Json(json!({
        "success": true,
        "script": script,
        "keywords": keywords,
        "filename": filename,
        "fallback": fallback,
    }))
    .into_response()
}

/// Fresh unique audio filename: UTC timestamp plus a random suffix, so
/// concurrent requests never collide.
pub fn generate_filename() -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let uid = Uuid::new_v4().simple().to_string();
    format!("tts_audio_{}_{}.wav", timestamp, &uid[..8])
}

/// One numbered keyword per line, matching the side-file format.
pub fn render_keywords_file(keywords: &[String]) -> String {
    let mut out = String::from("Keywords from generated script:\n");
    for (i, keyword) in keywords.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, keyword));
    }
    out
}
