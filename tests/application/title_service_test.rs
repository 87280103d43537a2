use std::sync::Arc;

use voxscribe::application::ports::{LlmClient, LlmClientError};
use voxscribe::application::services::TitleService;

struct CannedLlmClient {
    completion: String,
}

#[async_trait::async_trait]
impl LlmClient for CannedLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.completion.clone())
    }
}

/// Captures the prompt so tests can assert on the template.
struct EchoLlmClient;

#[async_trait::async_trait]
impl LlmClient for EchoLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        Ok(prompt.to_string())
    }
}

fn service(completion: &str) -> TitleService<CannedLlmClient> {
    TitleService::new(
        Arc::new(CannedLlmClient {
            completion: completion.to_string(),
        }),
        3,
    )
}

#[tokio::test]
async fn given_plain_lines_when_suggesting_then_each_line_is_a_title() {
    let titles = service("Alpha\nBeta\nGamma").suggest("content").await.unwrap();

    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn given_numbered_list_when_suggesting_then_markers_are_stripped() {
    let titles = service("1. First\n2) Second\n3. Third")
        .suggest("content")
        .await
        .unwrap();

    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn given_bulleted_and_quoted_lines_when_suggesting_then_cleaned() {
    let titles = service("- \"Quoted Title\"\n* Another One")
        .suggest("content")
        .await
        .unwrap();

    assert_eq!(titles, vec!["Quoted Title", "Another One"]);
}

#[tokio::test]
async fn given_blank_lines_when_suggesting_then_they_are_dropped() {
    let titles = service("First\n\n   \nSecond\n").suggest("content").await.unwrap();

    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn given_empty_completion_when_suggesting_then_returns_no_titles() {
    let titles = service("").suggest("content").await.unwrap();

    assert!(titles.is_empty());
}

#[tokio::test]
async fn given_any_content_when_suggesting_then_prompt_contains_count_and_content() {
    let service = TitleService::new(Arc::new(EchoLlmClient), 3);

    let echoed = service.suggest("my blog body").await.unwrap();
    let prompt = echoed.join("\n");

    assert!(prompt.contains("Suggest 3 catchy blog post titles"));
    assert!(prompt.contains("my blog body"));
}
