mod audio_decoder;
mod llm_client;
mod speech_to_text;
mod voice_encoder;

pub use audio_decoder::{AudioDecoder, AudioDecoderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use speech_to_text::{SpeechToText, TranscriptionError};
pub use voice_encoder::{VoiceEncoder, VoiceEncoderError};
