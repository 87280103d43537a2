use std::sync::Arc;

use voxscribe::application::ports::{
    AudioDecoder, AudioDecoderError, SpeechToText, TranscriptionError, VoiceEncoder,
    VoiceEncoderError,
};
use voxscribe::application::services::{DiarizationError, DiarizationService};
use voxscribe::domain::{TranscriptSegment, VoiceEmbedding};

const MIN_UTTERANCE_SAMPLES: usize = 400;

struct StaticSpeechToText {
    segments: Vec<TranscriptSegment>,
}

#[async_trait::async_trait]
impl SpeechToText for StaticSpeechToText {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
    ) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        Ok(self.segments.clone())
    }
}

/// Embeds slices by their mean value, and records nothing else.
struct MeanVoiceEncoder;

#[async_trait::async_trait]
impl VoiceEncoder for MeanVoiceEncoder {
    async fn embed_utterance(&self, pcm: &[f32]) -> Result<VoiceEmbedding, VoiceEncoderError> {
        if pcm.len() < MIN_UTTERANCE_SAMPLES {
            return Err(VoiceEncoderError::UtteranceTooShort { samples: pcm.len() });
        }
        let mean: f32 = pcm.iter().sum::<f32>() / pcm.len() as f32;
        Ok(VoiceEmbedding::new(vec![mean, 1.0]))
    }

    fn dimensions(&self) -> usize {
        2
    }
}

/// Three seconds of PCM: positive, negative, positive again.
struct AlternatingDecoder;

impl AudioDecoder for AlternatingDecoder {
    fn decode(&self, _data: &[u8]) -> Result<Vec<f32>, AudioDecoderError> {
        let mut pcm = vec![1.0f32; 16_000];
        pcm.extend(vec![-1.0f32; 16_000]);
        pcm.extend(vec![1.0f32; 16_000]);
        Ok(pcm)
    }
}

struct FailingDecoder;

impl AudioDecoder for FailingDecoder {
    fn decode(&self, _data: &[u8]) -> Result<Vec<f32>, AudioDecoderError> {
        Err(AudioDecoderError::DecodingFailed("garbage input".to_string()))
    }
}

fn service_with(
    segments: Vec<TranscriptSegment>,
) -> DiarizationService<StaticSpeechToText, MeanVoiceEncoder, AlternatingDecoder> {
    DiarizationService::new(
        Arc::new(StaticSpeechToText { segments }),
        Arc::new(MeanVoiceEncoder),
        Arc::new(AlternatingDecoder),
        2,
        MIN_UTTERANCE_SAMPLES,
    )
}

#[tokio::test]
async fn given_alternating_voices_when_diarizing_then_speakers_alternate() {
    let service = service_with(vec![
        TranscriptSegment::new(0.0, 1.0, "one"),
        TranscriptSegment::new(1.0, 2.0, "two"),
        TranscriptSegment::new(2.0, 3.0, "three"),
    ]);

    let labeled = service.transcribe_bytes(b"ignored").await.unwrap();

    assert_eq!(labeled.len(), 3);
    assert_eq!(labeled[0].speaker, "speaker_1");
    assert_eq!(labeled[1].speaker, "speaker_2");
    assert_eq!(labeled[2].speaker, "speaker_1");
}

#[tokio::test]
async fn given_single_segment_when_diarizing_then_one_speaker() {
    let service = service_with(vec![TranscriptSegment::new(0.0, 1.0, "only")]);

    let labeled = service.transcribe_bytes(b"ignored").await.unwrap();

    assert_eq!(labeled.len(), 1);
    assert_eq!(labeled[0].speaker, "speaker_1");
}

#[tokio::test]
async fn given_no_segments_when_diarizing_then_returns_empty() {
    let service = service_with(Vec::new());

    let labeled = service.transcribe_bytes(b"ignored").await.unwrap();

    assert!(labeled.is_empty());
}

#[tokio::test]
async fn given_degenerate_segment_when_diarizing_then_still_labeled() {
    // Second segment has inverted bounds; it gets a zero embedding but is
    // still present in the output.
    let service = service_with(vec![
        TranscriptSegment::new(0.0, 1.0, "fine"),
        TranscriptSegment::new(2.0, 2.0, "empty slice"),
    ]);

    let labeled = service.transcribe_bytes(b"ignored").await.unwrap();

    assert_eq!(labeled.len(), 2);
    assert!(labeled[1].speaker.starts_with("speaker_"));
}

#[tokio::test]
async fn given_segment_past_audio_end_when_diarizing_then_slice_is_clamped() {
    let service = service_with(vec![TranscriptSegment::new(2.5, 99.0, "tail")]);

    let labeled = service.transcribe_bytes(b"ignored").await.unwrap();

    assert_eq!(labeled.len(), 1);
    assert_eq!(labeled[0].speaker, "speaker_1");
}

#[tokio::test]
async fn given_undecodable_audio_when_diarizing_then_returns_decoding_error() {
    let service = DiarizationService::new(
        Arc::new(StaticSpeechToText {
            segments: vec![TranscriptSegment::new(0.0, 1.0, "text")],
        }),
        Arc::new(MeanVoiceEncoder),
        Arc::new(FailingDecoder),
        2,
        MIN_UTTERANCE_SAMPLES,
    );

    let result = service.transcribe_bytes(b"garbage").await;

    assert!(matches!(result, Err(DiarizationError::Decoding(_))));
}
