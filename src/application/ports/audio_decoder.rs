pub trait AudioDecoder: Send + Sync {
    /// Decodes an encoded audio container into 16 kHz mono f32 PCM.
    fn decode(&self, data: &[u8]) -> Result<Vec<f32>, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}
