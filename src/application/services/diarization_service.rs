use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    AudioDecoder, AudioDecoderError, SpeechToText, TranscriptionError, VoiceEncoder,
    VoiceEncoderError,
};
use crate::domain::{assign_speakers, cluster_embeddings, LabeledSegment, VoiceEmbedding};

const SAMPLE_RATE: usize = 16_000;

#[derive(Debug, thiserror::Error)]
pub enum DiarizationError {
    #[error("failed to read staged audio: {0}")]
    StagedFileUnreadable(#[from] std::io::Error),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Decoding(#[from] AudioDecoderError),
    #[error(transparent)]
    VoiceEncoding(#[from] VoiceEncoderError),
}

/// Orchestrates the transcription pipeline: speech-to-text, per-segment
/// voice embedding, speaker clustering, label assignment.
pub struct DiarizationService<S, V, D>
where
    S: SpeechToText + ?Sized,
    V: VoiceEncoder,
    D: AudioDecoder,
{
    transcriber: Arc<S>,
    voice_encoder: Arc<V>,
    audio_decoder: Arc<D>,
    max_speakers: usize,
    min_utterance_samples: usize,
}

impl<S, V, D> DiarizationService<S, V, D>
where
    S: SpeechToText + ?Sized,
    V: VoiceEncoder,
    D: AudioDecoder,
{
    pub fn new(
        transcriber: Arc<S>,
        voice_encoder: Arc<V>,
        audio_decoder: Arc<D>,
        max_speakers: usize,
        min_utterance_samples: usize,
    ) -> Self {
        Self {
            transcriber,
            voice_encoder,
            audio_decoder,
            max_speakers,
            min_utterance_samples,
        }
    }

    /// Runs the full pipeline against a staged upload.
    pub async fn transcribe_file(
        &self,
        path: &Path,
    ) -> Result<Vec<LabeledSegment>, DiarizationError> {
        let audio = tokio::fs::read(path).await?;
        self.transcribe_bytes(&audio).await
    }

    pub async fn transcribe_bytes(
        &self,
        audio: &[u8],
    ) -> Result<Vec<LabeledSegment>, DiarizationError> {
        let segments = self.transcriber.transcribe(audio).await?;
        if segments.is_empty() {
            tracing::info!("Transcription produced no segments");
            return Ok(Vec::new());
        }

        let pcm = self.audio_decoder.decode(audio)?;

        let mut embeddings = Vec::with_capacity(segments.len());
        for segment in &segments {
            embeddings.push(self.embed_segment(&pcm, segment.start, segment.end).await?);
        }

        let num_speakers = self.max_speakers.min(embeddings.len());
        let labels = cluster_embeddings(&embeddings, num_speakers);

        let distinct = labels.iter().max().map(|m| m + 1).unwrap_or(0);
        tracing::info!(
            segments = segments.len(),
            speakers = distinct,
            "Diarization completed"
        );

        Ok(assign_speakers(segments, &labels))
    }

    /// Embeds the PCM slice covered by `[start, end)` seconds. Slices that
    /// fall outside the decoded audio or are shorter than the minimum
    /// utterance get a zero embedding and still participate in clustering.
    async fn embed_segment(
        &self,
        pcm: &[f32],
        start: f64,
        end: f64,
    ) -> Result<VoiceEmbedding, DiarizationError> {
        let start_idx = ((start.max(0.0) * SAMPLE_RATE as f64) as usize).min(pcm.len());
        let end_idx = ((end.max(0.0) * SAMPLE_RATE as f64) as usize).min(pcm.len());

        if end_idx <= start_idx || end_idx - start_idx < self.min_utterance_samples {
            tracing::debug!(start, end, "Segment slice too short, using zero embedding");
            return Ok(VoiceEmbedding::zeros(self.voice_encoder.dimensions()));
        }

        match self.voice_encoder.embed_utterance(&pcm[start_idx..end_idx]).await {
            Ok(embedding) => Ok(embedding),
            Err(VoiceEncoderError::UtteranceTooShort { samples }) => {
                tracing::debug!(start, end, samples, "Encoder rejected short utterance");
                Ok(VoiceEmbedding::zeros(self.voice_encoder.dimensions()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
