// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams where the outside world plugs into the core:
//
//   PageSource        — something with pages of text (a PDF,
//                       or a Vec of strings in tests)
//   CompletionClient  — something that turns a prompt into a
//                       completion (the Groq HTTP API, or a
//                       scripted fake in tests)
//
// The application layer only sees these traits, so tests run
// without real PDFs or network access.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::errors::CompletionError;

// ─── PageSource ───────────────────────────────────────────────────────────────
/// A page-structured document.
pub trait PageSource {
    /// Number of pages, in reading order
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (0-based).
    /// `None` means the page has no extractable text.
    fn page_text(&self, index: usize) -> Option<String>;
}

/// In-memory pages, mostly useful for tests and piped text
impl PageSource for Vec<String> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Option<String> {
        self.get(index).cloned()
    }
}

// ─── CompletionClient ─────────────────────────────────────────────────────────
/// A single-turn chat completion endpoint.
///
/// One call = one request carrying exactly one user message.
/// No conversation history is ever sent.
pub trait CompletionClient {
    /// Send `prompt` to `model`, authenticating with `api_key`,
    /// and return the raw completion text.
    fn complete(&self, api_key: &str, model: &str, prompt: &str) -> Result<String, CompletionError>;
}
