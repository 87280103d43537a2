use async_trait::async_trait;

use crate::domain::VoiceEmbedding;

#[async_trait]
pub trait VoiceEncoder: Send + Sync {
    /// Embeds one utterance of 16 kHz mono PCM into a fixed-length vector.
    async fn embed_utterance(&self, pcm: &[f32]) -> Result<VoiceEmbedding, VoiceEncoderError>;

    /// Output vector length, used to build zero stand-ins for empty slices.
    fn dimensions(&self) -> usize;
}

#[derive(Debug, thiserror::Error)]
pub enum VoiceEncoderError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("utterance too short: {samples} samples")]
    UtteranceTooShort { samples: usize },
}
