use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioDecoder, LlmClient, SpeechToText, VoiceEncoder};
use crate::application::services::DiarizationError;
use crate::domain::LabeledSegment;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

const UPLOAD_FIELD: &str = "audio";

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub transcription: Vec<SegmentResponse>,
}

#[derive(Serialize)]
pub struct SegmentResponse {
    pub start: f64,
    pub end: f64,
    pub speaker: String,
    pub text: String,
}

impl From<LabeledSegment> for SegmentResponse {
    fn from(segment: LabeledSegment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            speaker: segment.speaker,
            text: segment.text,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<S, V, D, L>(
    State(state): State<AppState<S, V, D, L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    S: SpeechToText + ?Sized + 'static,
    V: VoiceEncoder + 'static,
    D: AudioDecoder + 'static,
    L: LlmClient + 'static,
{
    let mut audio = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        match field.bytes().await {
            Ok(data) => {
                tracing::debug!(filename = %filename, bytes = data.len(), "Audio upload received");
                audio = Some(data);
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read audio bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some(data) = audio else {
        tracing::warn!("Transcribe request without an audio field");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio file provided".to_string(),
            }),
        )
            .into_response();
    };

    let max_bytes = state.settings.transcription.max_upload_mb * 1024 * 1024;
    if data.len() > max_bytes {
        tracing::warn!(bytes = data.len(), max_bytes, "Upload over size cap");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!(
                    "Audio file exceeds the {} MB limit",
                    state.settings.transcription.max_upload_mb
                ),
            }),
        )
            .into_response();
    }

    let staged = match state.upload_spool.stage(&data) {
        Ok(staged) => staged,
        Err(e) => {
            tracing::error!(error = %e, "Failed to stage upload");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to stage upload: {}", e),
                }),
            )
                .into_response();
        }
    };

    match state.diarization_service.transcribe_file(staged.path()).await {
        Ok(segments) => {
            tracing::info!(segments = segments.len(), "Transcription request completed");
            (
                StatusCode::OK,
                Json(TranscriptionResponse {
                    transcription: segments.into_iter().map(SegmentResponse::from).collect(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = match &e {
                DiarizationError::Decoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(error = %e, "Transcription failed");
            (
                status,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
