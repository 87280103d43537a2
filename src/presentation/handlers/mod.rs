mod health;
mod suggest_titles;
mod transcribe;

pub use health::health_handler;
pub use suggest_titles::suggest_titles_handler;
pub use transcribe::transcribe_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
