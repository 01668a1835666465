// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   chat     — interactive flashcard session over one PDF
//   ask      — one question, one flashcard, then exit
//   extract  — print the text pulled out of a PDF
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::config::FlashcardConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat about a PDF, one flashcard per question
    Chat(ChatArgs),

    /// Generate a single flashcard and exit
    Ask(AskArgs),

    /// Print the text extracted from a PDF
    Extract(ExtractArgs),
}

/// Arguments for the `chat` command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// PDF file to learn from
    #[arg(long)]
    pub file: PathBuf,

    /// Groq API key; asked for interactively when absent
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// PDF file to learn from
    #[arg(long)]
    pub file: PathBuf,

    /// Topic or question for the flashcard
    #[arg(long)]
    pub question: String,

    /// Groq API key; asked for interactively when absent
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(flatten)]
    pub model: ModelArgs,
}

/// Arguments for the `extract` command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// PDF file to read
    #[arg(long)]
    pub file: PathBuf,

    /// Print only the excerpt that would be put into a prompt
    #[arg(long)]
    pub excerpt: bool,

    /// Excerpt length in characters (defaults to the configured cap)
    #[arg(long)]
    pub max_chars: Option<usize>,
}

/// Overrides for FlashcardConfig. Unset flags keep the value
/// from the config file (or the default).
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Model identifier sent with every request
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Maximum document characters put into a prompt
    #[arg(long)]
    pub max_context_chars: Option<usize>,

    /// How many times a rate-limited request is retried
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Seconds to wait before each retry
    #[arg(long)]
    pub retry_delay_secs: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ModelArgs {
    /// Layer these flags over `base`.
    pub fn apply(self, base: FlashcardConfig) -> FlashcardConfig {
        FlashcardConfig {
            model:                self.model.unwrap_or(base.model),
            api_base_url:         self.api_base_url.unwrap_or(base.api_base_url),
            max_context_chars:    self.max_context_chars.unwrap_or(base.max_context_chars),
            max_retries:          self.max_retries.unwrap_or(base.max_retries),
            retry_delay_secs:     self.retry_delay_secs.unwrap_or(base.retry_delay_secs),
            request_timeout_secs: self.timeout_secs.unwrap_or(base.request_timeout_secs),
        }
    }
}
