// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can produce, as typed enums:
//
//   ExtractError     — the PDF could not be opened or read.
//                      Never recovered; aborts the interaction.
//   CompletionError  — one HTTP call to the model failed.
//                      Produced by a CompletionClient.
//   ResponderError   — what the Responder reports after its
//                      retry policy has run its course.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file into text
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a PDF we can open (corrupt, truncated, encrypted)
    #[error("cannot parse document '{source_name}': {reason}")]
    Parse {
        source_name: String,
        reason:      String,
    },
}

/// Failure of a single completion request
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The API throttled us (HTTP 429 or a `rate_limit_exceeded` error body)
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success HTTP status
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Connection, TLS, timeout or body decoding problems
    #[error("request failed: {0}")]
    Transport(String),

    /// Success status, but no usable text in the reply
    #[error("completion contained no text")]
    EmptyCompletion,
}

impl CompletionError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, CompletionError::RateLimited(_))
    }
}

/// Outcome of a Responder call that did not produce a flashcard
#[derive(Debug, Error)]
pub enum ResponderError {
    /// Still rate limited after every allowed retry
    #[error("rate limit still exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// Non-retryable failure from the completion API
    #[error("error during completion API call: {0}")]
    Remote(#[source] CompletionError),
}

impl ResponderError {
    /// Text shown in the chat in place of a flashcard
    pub const PLACEHOLDER: &'static str = "Error generating response.";
}
