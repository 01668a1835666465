// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, builds the session, and hands terminal I/O to the chat
// loop. All flashcard logic lives in Layer 2.
//
// Commands:
//   1. `chat`     — interactive session over one PDF
//   2. `ask`      — one flashcard, then exit
//   3. `extract`  — print the PDF's text
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod chat;
pub mod commands;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use commands::{AskArgs, ChatArgs, Commands, ExtractArgs};

use crate::application::config::FlashcardConfig;
use crate::application::responder::Responder;
use crate::application::session::Session;
use crate::data::excerpt::Excerpter;
use crate::data::loader::PdfLoader;
use crate::infra::completion_client::HttpCompletionClient;
use crate::infra::config_store::load_config;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-flashcards",
    version,
    about = "Upload a PDF and learn its content through AI-generated flashcards."
)]
pub struct Cli {
    /// JSON file with model, retry and timeout settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the matching command handler.
    pub fn run(self) -> Result<()> {
        let base = load_config(self.config.as_deref())?;

        match self.command {
            Commands::Chat(args)    => run_chat(args, base),
            Commands::Ask(args)     => run_ask(args, base),
            Commands::Extract(args) => run_extract(args, base),
        }
    }
}

/// Handles the `chat` subcommand.
fn run_chat(args: ChatArgs, base: FlashcardConfig) -> Result<()> {
    let cfg         = args.model.apply(base);
    let mut session = build_session(&cfg)?;

    session.load_document(load_pdf(&args.file)?);
    println!("PDF content loaded. The AI will now create flashcards for you.");

    if let Some(key) = args.api_key {
        session.set_credential(key)?;
    }

    let stdin = io::stdin();
    chat::run_chat(&mut session, &mut stdin.lock(), &mut io::stdout().lock(), &mut io::stderr())
}

/// Handles the `ask` subcommand.
fn run_ask(args: AskArgs, base: FlashcardConfig) -> Result<()> {
    let cfg         = args.model.apply(base);
    let mut session = build_session(&cfg)?;

    session.load_document(load_pdf(&args.file)?);

    let key = match args.api_key {
        Some(key) => key,
        None => {
            let stdin = io::stdin();
            chat::prompt_line(&mut stdin.lock(), &mut io::stderr(), chat::KEY_PROMPT)?
                .context("No API key given")?
        }
    };
    session.set_credential(key)?;

    let turn = session.ask(&args.question)?;
    if turn.is_failure() {
        bail!("{}: {}", turn.content, turn.failure.as_deref().unwrap_or_default());
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", turn.content)?;
    Ok(())
}

/// Handles the `extract` subcommand.
fn run_extract(args: ExtractArgs, base: FlashcardConfig) -> Result<()> {
    let doc = load_pdf(&args.file)?;

    let mut out = io::stdout().lock();
    if args.excerpt {
        let excerpter = Excerpter::new(args.max_chars.unwrap_or(base.max_context_chars));
        writeln!(out, "{}", excerpter.excerpt(&doc.text))?;
    } else {
        writeln!(out, "{}", doc.text)?;
    }
    Ok(())
}

fn load_pdf(path: &std::path::Path) -> Result<crate::domain::document::Document> {
    PdfLoader::new()
        .load_path(path)
        .with_context(|| format!("Failed to load PDF '{}'", path.display()))
}

/// Wire the HTTP client and Responder into a fresh session.
fn build_session(cfg: &FlashcardConfig) -> Result<Session<HttpCompletionClient>> {
    let client = HttpCompletionClient::new(&cfg.api_base_url, cfg.request_timeout())
        .context("Cannot build HTTP client")?;

    tracing::info!("Using model '{}' at {}", cfg.model, cfg.api_base_url);

    let responder = Responder::new(client, cfg).with_retry_hook(|notice| {
        eprintln!(
            "warning: Rate limit reached. Retrying in {}s ({}/{})...",
            notice.delay.as_secs(),
            notice.retry,
            notice.max_retries
        );
    });

    Ok(Session::new(responder))
}
