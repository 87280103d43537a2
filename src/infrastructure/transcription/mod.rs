mod candle_whisper;
mod engine_factory;
mod openai_whisper;

pub use candle_whisper::CandleWhisperEngine;
pub use engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
pub use openai_whisper::OpenAiWhisperEngine;
