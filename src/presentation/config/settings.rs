use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub speaker: SpeakerSettings,
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerSettings {
    pub model: String,
    pub max_speakers: usize,
    pub min_utterance_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub title_count: usize,
}

impl Settings {
    /// Assembles settings from environment variables, mirroring the env the
    /// service is deployed with. Anything unset falls back to a default.
    pub fn from_env() -> Result<Self, String> {
        let provider = match env_or("TRANSCRIPTION_PROVIDER", "local").to_lowercase().as_str() {
            "local" => TranscriptionProviderSetting::Local,
            "openai" => TranscriptionProviderSetting::OpenAi,
            other => {
                return Err(format!(
                    "Invalid TRANSCRIPTION_PROVIDER: {}. Expected: local or openai",
                    other
                ));
            }
        };

        let default_model = match provider {
            TranscriptionProviderSetting::Local => "openai/whisper-base",
            TranscriptionProviderSetting::OpenAi => "whisper-1",
        };

        Ok(Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parse_or("SERVER_PORT", 3000)?,
            },
            transcription: TranscriptionSettings {
                provider,
                model: env_or("TRANSCRIPTION_MODEL", default_model),
                api_key: std::env::var("TRANSCRIPTION_API_KEY")
                    .or_else(|_| std::env::var("OPENAI_API_KEY"))
                    .ok(),
                base_url: std::env::var("TRANSCRIPTION_BASE_URL").ok(),
                max_upload_mb: env_parse_or("MAX_UPLOAD_MB", 50)?,
            },
            speaker: SpeakerSettings {
                model: env_or("SPEAKER_MODEL", "resemble-ai/resemblyzer"),
                max_speakers: env_parse_or("MAX_SPEAKERS", 2)?,
                min_utterance_ms: env_parse_or("MIN_UTTERANCE_MS", 25)?,
            },
            llm: LlmSettings {
                api_key: std::env::var("OPENROUTER_API_KEY")
                    .or_else(|_| std::env::var("OPENAI_API_KEY"))
                    .unwrap_or_default(),
                base_url: env_or("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
                model: env_or("TITLE_MODEL", "mistralai/mistral-7b-instruct"),
                max_tokens: env_parse_or("LLM_MAX_TOKENS", 256)?,
                temperature: env_parse_or("LLM_TEMPERATURE", 0.7)?,
                title_count: env_parse_or("TITLE_COUNT", 3)?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("Invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
