use async_trait::async_trait;

use crate::domain::TranscriptSegment;

#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribes encoded audio into timestamped segments.
    async fn transcribe(&self, audio_data: &[u8])
        -> Result<Vec<TranscriptSegment>, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
