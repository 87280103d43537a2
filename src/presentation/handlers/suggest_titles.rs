use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    AudioDecoder, LlmClient, LlmClientError, SpeechToText, VoiceEncoder,
};
use crate::application::services::TitleSuggestionError;
use crate::infrastructure::observability::sanitize_content;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SuggestTitlesRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize)]
pub struct SuggestTitlesResponse {
    pub suggested_titles: Vec<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn suggest_titles_handler<S, V, D, L>(
    State(state): State<AppState<S, V, D, L>>,
    Json(request): Json<SuggestTitlesRequest>,
) -> impl IntoResponse
where
    S: SpeechToText + ?Sized + 'static,
    V: VoiceEncoder + 'static,
    D: AudioDecoder + 'static,
    L: LlmClient + 'static,
{
    if request.content.trim().is_empty() {
        tracing::warn!("Title request without content");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No blog content provided".to_string(),
            }),
        )
            .into_response();
    }

    tracing::debug!(content = %sanitize_content(&request.content), "Processing title request");

    match state.title_service.suggest(&request.content).await {
        Ok(suggested_titles) => (
            StatusCode::OK,
            Json(SuggestTitlesResponse { suggested_titles }),
        )
            .into_response(),
        Err(TitleSuggestionError::Llm(LlmClientError::RateLimited)) => {
            tracing::warn!("Upstream LLM rate limited");
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse {
                    error: "Rate limited by the completion API".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Title suggestion failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Title suggestion failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
