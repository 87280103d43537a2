use std::sync::Arc;

use crate::application::ports::{AudioDecoder, LlmClient, SpeechToText, VoiceEncoder};
use crate::application::services::{DiarizationService, TitleService};
use crate::infrastructure::audio::UploadSpool;
use crate::presentation::config::Settings;

pub struct AppState<S: ?Sized, V, D, L>
where
    S: SpeechToText,
    V: VoiceEncoder,
    D: AudioDecoder,
    L: LlmClient,
{
    pub diarization_service: Arc<DiarizationService<S, V, D>>,
    pub title_service: Arc<TitleService<L>>,
    pub upload_spool: UploadSpool,
    pub settings: Settings,
}

impl<S: ?Sized, V, D, L> Clone for AppState<S, V, D, L>
where
    S: SpeechToText,
    V: VoiceEncoder,
    D: AudioDecoder,
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            diarization_service: Arc::clone(&self.diarization_service),
            title_service: Arc::clone(&self.title_service),
            upload_spool: self.upload_spool.clone(),
            settings: self.settings.clone(),
        }
    }
}
