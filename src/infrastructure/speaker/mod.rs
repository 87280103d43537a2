mod candle_voice_encoder;

pub use candle_voice_encoder::CandleVoiceEncoder;
