use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    /// Gemini API key used for both script generation and TTS.
    pub gemini_api_key: String,
    pub text_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    /// Directory where generated WAV files (and keyword side files) land.
    pub audio_dir: String,
    pub keyword_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            gemini_api_key: env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY is required"),
            text_model: env::var("TEXT_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into()),
            tts_model: env::var("TTS_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-preview-tts".into()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "Kore".into()),
            audio_dir: env::var("AUDIO_DIR").unwrap_or_else(|_| "./generated_audio".into()),
            keyword_limit: env::var("KEYWORD_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origin
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
