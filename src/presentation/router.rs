use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioDecoder, LlmClient, SpeechToText, VoiceEncoder};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, suggest_titles_handler, transcribe_handler};
use crate::presentation::state::AppState;

pub fn create_router<S, V, D, L>(state: AppState<S, V, D, L>) -> Router
where
    S: SpeechToText + ?Sized + 'static,
    V: VoiceEncoder + 'static,
    D: AudioDecoder + 'static,
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Room for the multipart envelope on top of the audio payload.
    let body_limit = (state.settings.transcription.max_upload_mb + 1) * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/transcribe", post(transcribe_handler::<S, V, D, L>))
        .route(
            "/api/v1/suggest-titles",
            post(suggest_titles_handler::<S, V, D, L>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
