mod diarization_service;
mod title_service;

pub use diarization_service::{DiarizationError, DiarizationService};
pub use title_service::{TitleService, TitleSuggestionError};
