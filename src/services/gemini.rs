//! Gemini API service — script generation and speech synthesis.
//!
//! Provides:
//! - `generate_script()` — one-shot text generation for the voiceover script
//! - `synthesize_speech()` — TTS returning raw PCM, or `Unavailable` so the
//!   caller can substitute the local fallback tone
//!
//! Credentials are passed in explicitly by the caller (from `Config`); this
//! module holds no process-wide state.

use base64::Engine;
use reqwest::Client;
use std::time::Duration;

use crate::services::audio::REMOTE_SAMPLE_RATE;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw PCM audio as returned by the TTS endpoint (mono, signed 16-bit LE).
#[derive(Debug, Clone)]
pub struct PcmAudio {
    pub data: Vec<u8>,
    pub sample_rate: u32,
}

/// Outcome of a speech synthesis attempt. `Unavailable` is a valid terminal
/// result, not an error: the caller branches and substitutes the fallback
/// tone exactly once.
#[derive(Debug)]
pub enum SpeechResult {
    Synthesized(PcmAudio),
    Unavailable(String),
}

fn http_client() -> Result<Client, String> {
    Client::builder()
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| format!("HTTP client error: {e}"))
}

// ---------------------------------------------------------------------------
// generate_script
// ---------------------------------------------------------------------------

/// Generate a voiceover script from a prompt.
/// Returns the generated text, or a user-safe error message.
pub async fn generate_script(api_key: &str, model: &str, prompt: &str) -> Result<String, String> {
    let client = http_client()?;

    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    });

    let resp = client
        .post(format!("{GEMINI_BASE}/{model}:generateContent"))
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Gemini request failed: {}", e);
            "Script generation failed".to_string()
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let err_body = resp.text().await.unwrap_or_default();
        tracing::error!("Gemini returned {}: {}", status, err_body);
        return Err("Script generation failed".into());
    }

    let v: serde_json::Value = resp.json().await.map_err(|e| {
        tracing::error!("Gemini response parse failed: {}", e);
        "Script generation failed".to_string()
    })?;

    parse_text_response(&v).ok_or_else(|| {
        tracing::error!("Gemini response contained no text candidate");
        "Script generation failed".into()
    })
}

// ---------------------------------------------------------------------------
// synthesize_speech
// ---------------------------------------------------------------------------

/// Request synthesized speech for a script.
///
/// Any failure — network, non-2xx status, or a response without inline audio
/// data — collapses into `SpeechResult::Unavailable` with a reason string.
pub async fn synthesize_speech(
    api_key: &str,
    model: &str,
    voice: &str,
    text: &str,
) -> SpeechResult {
    let client = match http_client() {
        Ok(c) => c,
        Err(e) => return SpeechResult::Unavailable(e),
    };

    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": voice }
                }
            }
        }
    });

    let resp = match client
        .post(format!("{GEMINI_BASE}/{model}:generateContent"))
        .header("x-goog-api-key", api_key)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("TTS request failed: {}", e);
            return SpeechResult::Unavailable(format!("TTS request failed: {e}"));
        }
    };

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let err_body = resp.text().await.unwrap_or_default();
        tracing::warn!("TTS API returned {}: {}", status, err_body);
        return SpeechResult::Unavailable(format!("TTS API error {status}"));
    }

    let v: serde_json::Value = match resp.json().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("TTS response parse failed: {}", e);
            return SpeechResult::Unavailable(format!("TTS response parse failed: {e}"));
        }
    };

    match parse_audio_response(&v) {
        Some(data) => SpeechResult::Synthesized(PcmAudio {
            data,
            sample_rate: REMOTE_SAMPLE_RATE,
        }),
        None => SpeechResult::Unavailable("TTS response contained no audio data".into()),
    }
}

// ---------------------------------------------------------------------------
// Response parsing helpers
// ---------------------------------------------------------------------------

/// Extract the generated text from a `generateContent` response body.
pub fn parse_text_response(v: &serde_json::Value) -> Option<String> {
    v["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
}

/// Extract and decode the base64 inline audio payload from a TTS response.
/// Returns `None` if the payload is missing or not valid base64.
pub fn parse_audio_response(v: &serde_json::Value) -> Option<Vec<u8>> {
    let encoded = v["candidates"][0]["content"]["parts"][0]["inlineData"]["data"].as_str()?;
    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}
