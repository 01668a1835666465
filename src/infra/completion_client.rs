// ============================================================
// Layer 6 — HTTP Completion Client
// ============================================================
// Talks to an OpenAI-compatible chat completion endpoint
// (Groq by default) with reqwest's blocking client.
//
// Request:
//   POST {base_url}/chat/completions
//   Authorization: Bearer <api key>
//   { "model": "...", "messages": [ { "role": "user", "content": "<prompt>" } ] }
//
// Response (the part we read):
//   { "choices": [ { "message": { "content": "..." } } ] }
//
// Failures are sorted into CompletionError variants here, so
// the Responder can decide about retries without looking at
// HTTP details. Rate limiting is HTTP 429, or any error body
// mentioning `rate_limit_exceeded`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::domain::errors::CompletionError;
use crate::domain::traits::CompletionClient;

/// Marker the API puts in the error body when throttling
pub const RATE_LIMIT_MARKER: &str = "rate_limit_exceeded";

const TOO_MANY_REQUESTS: u16 = 429;

// ─── Wire types ───────────────────────────────────────────────────────────────
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model:    &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role:    &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────
/// Blocking client for `/chat/completions`.
pub struct HttpCompletionClient {
    http:     Client,
    base_url: String,
}

impl HttpCompletionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model,
            messages: [ChatMessage { role: "user", content: prompt }],
        };

        tracing::debug!("POST {} (model={}, {} prompt chars)", self.endpoint(), model, prompt.chars().count());

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &text));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| CompletionError::Transport(format!("invalid completion body: {e}")))?;

        parsed.into_text().ok_or(CompletionError::EmptyCompletion)
    }
}

/// Map a non-success status and its body to a CompletionError.
pub fn classify_failure(status: u16, body: &str) -> CompletionError {
    // Prefer the API's own message when the body is the usual JSON envelope
    let detail = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let flagged = detail
        .as_ref()
        .and_then(|d| d.code.as_deref())
        .map_or(false, |code| code == RATE_LIMIT_MARKER);

    let message = match detail {
        Some(d) if !d.message.is_empty() => d.message,
        _ => body.trim().to_string(),
    };

    if status == TOO_MANY_REQUESTS || flagged || body.contains(RATE_LIMIT_MARKER) {
        CompletionError::RateLimited(message)
    } else {
        CompletionError::Api { status, body: message }
    }
}
