use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmClientError};

#[derive(Debug, thiserror::Error)]
pub enum TitleSuggestionError {
    #[error(transparent)]
    Llm(#[from] LlmClientError),
}

/// Renders the title prompt, calls the completion API and parses the
/// response into individual titles.
pub struct TitleService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    title_count: usize,
}

impl<L> TitleService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, title_count: usize) -> Self {
        Self {
            llm_client,
            title_count,
        }
    }

    pub async fn suggest(&self, content: &str) -> Result<Vec<String>, TitleSuggestionError> {
        let prompt = format!(
            "Suggest {} catchy blog post titles for the following blog:\n\n{}",
            self.title_count, content
        );

        let completion = self.llm_client.complete(&prompt).await?;
        let titles = parse_titles(&completion);

        tracing::info!(titles = titles.len(), "Title suggestion completed");

        Ok(titles)
    }
}

/// Splits a completion into one title per line, stripping list markers and
/// surrounding quotes the model tends to add.
fn parse_titles(completion: &str) -> Vec<String> {
    completion.lines().filter_map(clean_title).collect()
}

fn clean_title(line: &str) -> Option<String> {
    let mut title = line.trim();

    // "1. Title", "2) Title"
    let digits = title.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &title[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            title = stripped.trim_start();
        }
    }

    // "- Title", "* Title"
    title = title
        .strip_prefix("- ")
        .or_else(|| title.strip_prefix("* "))
        .unwrap_or(title)
        .trim();

    if title.len() >= 2 {
        let quoted = (title.starts_with('"') && title.ends_with('"'))
            || (title.starts_with('\'') && title.ends_with('\''));
        if quoted {
            title = title[1..title.len() - 1].trim();
        }
    }

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
