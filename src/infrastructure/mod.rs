pub mod audio;
pub mod llm;
pub mod observability;
pub mod speaker;
pub mod transcription;
