// ============================================================
// Layer 2 — Flashcard Configuration
// ============================================================
// Every tunable of the Responder and the HTTP client.
// Serialisable so it can be read from a JSON file; every field
// has a default so a partial file is fine.
//
// Precedence (lowest → highest):
//   Default::default()  →  --config file.json  →  CLI flags

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::responder::RetryPolicy;
use crate::data::excerpt::DEFAULT_MAX_CONTEXT_CHARS;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Groq's OpenAI-compatible endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardConfig {
    pub model:                String,
    pub api_base_url:         String,
    pub max_context_chars:    usize,
    pub max_retries:          u32,
    pub retry_delay_secs:     u64,
    pub request_timeout_secs: u64,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        Self {
            model:                DEFAULT_MODEL.to_string(),
            api_base_url:         DEFAULT_API_BASE_URL.to_string(),
            max_context_chars:    DEFAULT_MAX_CONTEXT_CHARS,
            max_retries:          3,
            retry_delay_secs:     10,
            request_timeout_secs: 60,
        }
    }
}

impl FlashcardConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            delay:       Duration::from_secs(self.retry_delay_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
