use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use voxscribe::application::ports::SpeechToText;
use voxscribe::application::services::{DiarizationService, TitleService};
use voxscribe::infrastructure::audio::{SymphoniaAudioDecoder, UploadSpool};
use voxscribe::infrastructure::llm::OpenRouterClient;
use voxscribe::infrastructure::observability::{init_tracing, TracingConfig};
use voxscribe::infrastructure::speaker::CandleVoiceEncoder;
use voxscribe::infrastructure::transcription::{
    TranscriptionEngineFactory, TranscriptionProvider,
};
use voxscribe::presentation::{create_router, AppState, Settings, TranscriptionProviderSetting};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().map_err(anyhow::Error::msg)?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let provider = match settings.transcription.provider {
        TranscriptionProviderSetting::Local => TranscriptionProvider::Local,
        TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
    };

    let transcriber: Arc<dyn SpeechToText> = TranscriptionEngineFactory::create(
        provider,
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )
    .context("failed to build transcription engine")?;

    let voice_encoder = Arc::new(
        CandleVoiceEncoder::new(&settings.speaker.model)
            .context("failed to load voice encoder")?,
    );
    let audio_decoder = Arc::new(SymphoniaAudioDecoder);
    let llm_client = Arc::new(OpenRouterClient::new(&settings.llm));

    let min_utterance_samples = settings.speaker.min_utterance_ms as usize * 16;

    let diarization_service = Arc::new(DiarizationService::new(
        transcriber,
        Arc::clone(&voice_encoder),
        Arc::clone(&audio_decoder),
        settings.speaker.max_speakers,
        min_utterance_samples,
    ));

    let title_service = Arc::new(TitleService::new(
        Arc::clone(&llm_client),
        settings.llm.title_count,
    ));

    let state = AppState {
        diarization_service,
        title_service,
        upload_spool: UploadSpool::new(),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
