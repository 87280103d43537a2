mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LlmSettings, ServerSettings, Settings, SpeakerSettings, TranscriptionProviderSetting,
    TranscriptionSettings,
};
