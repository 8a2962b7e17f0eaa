/// LLM Client: the single point of entry for chat-completion calls.
///
/// No other module talks to the inference API directly. One request per
/// report: no retry, no streaming, no client-side timeout.
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompts;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Failure payload of a completion request.
///
/// The `Display` output is what the requesting user sees, so it carries the
/// status code and raw body (or the transport error description) verbatim.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Error: malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Either the assistant's text, untouched, or a failure payload.
pub type CompletionResult = Result<String, LlmError>;

/// Anything that can turn a prompt into a completion.
///
/// Implementations hold no per-call state and may be shared across requests.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionResult;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client (Groq by default).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            endpoint,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the fixed consultant persona plus `prompt` and returns the first
    /// choice's message content.
    pub async fn call(&self, prompt: &str) -> CompletionResult {
        let request_body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompts::CONSULTANT_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let started = std::time::Instant::now();
        debug!(prompt_chars = prompt.len(), model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed before a response arrived: {e}");
                LlmError::Http(e)
            })?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            warn!("Completion API returned {status}");
            // The status must survive even when the body cannot be read.
            let body = response.text().await.unwrap_or_else(|e| {
                warn!("Failed to read error body: {e}");
                String::new()
            });
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let text = extract_content(&body)?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            completion_chars = text.len(),
            "Completion received"
        );

        Ok(text)
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, prompt: &str) -> CompletionResult {
        self.call(prompt).await
    }
}

/// Pulls `choices[0].message.content` out of a successful response body.
fn extract_content(body: &str) -> CompletionResult {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::MalformedResponse("no choices[0].message.content".to_string()))
}
