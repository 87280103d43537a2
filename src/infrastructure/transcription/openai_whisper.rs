use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{SpeechToText, TranscriptionError};
use crate::domain::TranscriptSegment;

/// Remote transcription against an OpenAI-compatible
/// `/audio/transcriptions` endpoint. Requests `verbose_json` so the model's
/// own segment timestamps drive diarization.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    text: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl SpeechToText for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcription: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        let mut segments: Vec<TranscriptSegment> = transcription
            .segments
            .iter()
            .map(|s| TranscriptSegment::new(s.start, s.end, s.text.trim()))
            .collect();

        // Some compatible backends only fill `text`.
        if segments.is_empty() && !transcription.text.trim().is_empty() {
            let end = transcription.duration.unwrap_or(0.0);
            segments.push(TranscriptSegment::new(0.0, end, transcription.text.trim()));
        }

        tracing::info!(segments = segments.len(), "Whisper API transcription completed");

        Ok(segments)
    }
}
