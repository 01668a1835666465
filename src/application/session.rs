// ============================================================
// Layer 2 — Flashcard Session
// ============================================================
// Owns everything one chat session knows and sequences the
// Extractor and Responder against user events.
//
// State machine:
//
//   Empty ──load_document──▶ DocumentLoaded ──set_credential──▶ Ready
//                                                              │  ▲
//                                        ask / not understood  └──┘
//
// Every ask() appends exactly one (user, bot) pair to History,
// even when generation fails; the failed bot Turn carries the
// placeholder text plus the reason.
//
// Reading the history never calls the Responder, so rendering
// it any number of times changes nothing.

use thiserror::Error;

use crate::application::responder::Responder;
use crate::domain::document::Document;
use crate::domain::errors::ResponderError;
use crate::domain::prompt::SIMPLIFY_QUERY;
use crate::domain::traits::CompletionClient;
use crate::domain::turn::{History, Turn};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No document yet
    Empty,
    /// Document loaded, waiting for an API key
    DocumentLoaded,
    /// Document and API key present; queries accepted
    Ready,
}

/// Events the session refuses in its current state
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("load a document before entering an API key")]
    NoDocument,

    #[error("the session is not ready: {0:?}")]
    NotReady(SessionState),

    #[error("the API key is empty")]
    EmptyCredential,

    #[error("the query is empty")]
    EmptyQuery,

    #[error("there is no flashcard to simplify yet")]
    NoFlashcard,
}

/// One user's chat session over one document.
pub struct Session<C> {
    responder: Responder<C>,
    document:  Option<Document>,
    api_key:   Option<String>,
    history:   History,
}

impl<C: CompletionClient> Session<C> {
    /// Start an Empty session
    pub fn new(responder: Responder<C>) -> Self {
        Self {
            responder,
            document:  None,
            api_key:   None,
            history:   History::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.document, &self.api_key) {
            (None, _)          => SessionState::Empty,
            (Some(_), None)    => SessionState::DocumentLoaded,
            (Some(_), Some(_)) => SessionState::Ready,
        }
    }

    /// Attach (or replace) the session's document. History is kept.
    pub fn load_document(&mut self, document: Document) {
        tracing::info!(
            "Session document: '{}' ({} pages, {} chars)",
            document.source,
            document.page_count,
            document.char_count()
        );
        self.document = Some(document);
    }

    /// Remember the API key for this session only.
    pub fn set_credential(&mut self, api_key: impl Into<String>) -> Result<(), SessionError> {
        if self.document.is_none() {
            return Err(SessionError::NoDocument);
        }

        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(SessionError::EmptyCredential);
        }

        self.api_key = Some(api_key);
        tracing::debug!("API key set, session ready");
        Ok(())
    }

    /// Ask for a flashcard about `query`.
    ///
    /// Returns the bot Turn that was appended.
    pub fn ask(&mut self, query: &str) -> Result<&Turn, SessionError> {
        if query.trim().is_empty() {
            return Err(SessionError::EmptyQuery);
        }
        self.exchange(query)
    }

    /// Record whether the user understood the latest flashcard.
    ///
    /// `true` changes nothing. `false` asks for a simpler card and
    /// returns the new bot Turn.
    pub fn signal_understanding(&mut self, understood: bool) -> Result<Option<&Turn>, SessionError> {
        if understood {
            return Ok(None);
        }
        if self.current_flashcard().is_none() {
            return Err(SessionError::NoFlashcard);
        }

        tracing::info!("Flashcard not understood, asking for a simpler one");
        self.exchange(SIMPLIFY_QUERY).map(Some)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The latest bot answer, failed or not.
    pub fn current_flashcard(&self) -> Option<&str> {
        self.history.last_bot().map(|turn| turn.content.as_str())
    }

    #[cfg(test)]
    pub fn responder(&self) -> &Responder<C> {
        &self.responder
    }

    /// Run the Responder and append the resulting (user, bot) pair.
    fn exchange(&mut self, query: &str) -> Result<&Turn, SessionError> {
        let (Some(document), Some(api_key)) = (&self.document, &self.api_key) else {
            return Err(SessionError::NotReady(self.state()));
        };

        let bot = match self.responder.generate(&document.text, query, api_key) {
            Ok(card) => Turn::bot(card),
            Err(e)   => failed_turn(&e),
        };

        tracing::debug!("History grows to {} turns", self.history.len() + 2);

        Ok(self.history.push_exchange(Turn::user(query), bot))
    }
}

fn failed_turn(err: &ResponderError) -> Turn {
    Turn::bot_failure(ResponderError::PLACEHOLDER, err.to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::FlashcardConfig;
    use crate::application::responder::RetryPolicy;
    use crate::domain::turn::Role;
    use crate::testing::{rate_limited, server_error, ScriptedClient};
    use std::time::Duration;

    fn session(client: ScriptedClient) -> Session<ScriptedClient> {
        let responder = Responder::new(client, &FlashcardConfig::default())
            .with_retry_policy(RetryPolicy { max_retries: 3, delay: Duration::ZERO });
        Session::new(responder)
    }

    fn cats_and_dogs() -> Document {
        Document::new("animals.pdf", 2, "Cats are mammals.Dogs are mammals too.")
    }

    fn ready(client: ScriptedClient) -> Session<ScriptedClient> {
        let mut s = session(client);
        s.load_document(cats_and_dogs());
        s.set_credential("gsk_test").unwrap();
        s
    }

    #[test]
    fn test_state_transitions() {
        let mut s = session(ScriptedClient::default());
        assert_eq!(s.state(), SessionState::Empty);

        s.load_document(cats_and_dogs());
        assert_eq!(s.state(), SessionState::DocumentLoaded);

        s.set_credential("gsk_test").unwrap();
        assert_eq!(s.state(), SessionState::Ready);
    }

    #[test]
    fn test_credential_before_document_is_rejected() {
        let mut s = session(ScriptedClient::default());
        assert_eq!(s.set_credential("gsk_test"), Err(SessionError::NoDocument));
        assert_eq!(s.state(), SessionState::Empty);
    }

    #[test]
    fn test_blank_credential_is_rejected() {
        let mut s = session(ScriptedClient::default());
        s.load_document(cats_and_dogs());
        assert_eq!(s.set_credential("   "), Err(SessionError::EmptyCredential));
        assert_eq!(s.state(), SessionState::DocumentLoaded);
    }

    #[test]
    fn test_ask_before_ready_makes_no_call() {
        let mut s = session(ScriptedClient::default());
        s.load_document(cats_and_dogs());

        let err = s.ask("What are cats?").unwrap_err();
        assert_eq!(err, SessionError::NotReady(SessionState::DocumentLoaded));
        assert!(s.history().is_empty());
        assert_eq!(s.responder().client().calls(), 0);
    }

    #[test]
    fn test_ask_appends_user_and_bot_turns() {
        let mut s = ready(ScriptedClient::new(vec![Ok("  Q: What are cats?\nA: Mammals.\n".into())]));

        let bot = s.ask("What are cats?").unwrap().clone();
        assert_eq!(bot, Turn::bot("Q: What are cats?\nA: Mammals."));

        let turns = s.history().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], Turn::user("What are cats?"));
        assert_eq!(s.current_flashcard(), Some("Q: What are cats?\nA: Mammals."));

        let prompts = s.responder().client().prompts();
        let prompt  = &prompts[0];
        assert!(prompt.contains("Cats are mammals.Dogs are mammals too."));
        assert!(prompt.contains("What are cats?"));
    }

    #[test]
    fn test_blank_query_adds_nothing() {
        let mut s = ready(ScriptedClient::default());
        assert_eq!(s.ask("  \n").unwrap_err(), SessionError::EmptyQuery);
        assert!(s.history().is_empty());
        assert_eq!(s.responder().client().calls(), 0);
    }

    #[test]
    fn test_not_understood_asks_to_simplify() {
        let mut s = ready(ScriptedClient::new(vec![Ok("hard card".into()), Ok("easy card".into())]));
        s.ask("What are cats?").unwrap();
        let before = s.history().len();

        let bot = s.signal_understanding(false).unwrap().cloned();
        assert_eq!(bot, Some(Turn::bot("easy card")));

        let turns = s.history().turns();
        assert_eq!(turns.len(), before + 2);
        assert_eq!(turns[before], Turn::user("Please simplify the last flashcard."));
        assert_eq!(turns[before + 1].role, Role::Bot);
        assert_eq!(s.current_flashcard(), Some("easy card"));
    }

    #[test]
    fn test_understood_changes_nothing() {
        let mut s = ready(ScriptedClient::always("card", 1));
        s.ask("topic").unwrap();

        assert_eq!(s.signal_understanding(true).unwrap(), None);
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.responder().client().calls(), 1);
    }

    #[test]
    fn test_simplify_without_flashcard_is_rejected() {
        let mut s = ready(ScriptedClient::default());
        assert_eq!(s.signal_understanding(false).unwrap_err(), SessionError::NoFlashcard);
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_remote_failure_appends_placeholder_turn() {
        let mut s = ready(ScriptedClient::new(vec![server_error()]));

        let bot = s.ask("What are cats?").unwrap().clone();
        assert_eq!(bot.content, "Error generating response.");
        assert!(bot.is_failure());
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.responder().client().calls(), 1);
    }

    #[test]
    fn test_exhausted_rate_limit_appends_failure_with_reason() {
        let script = (0..4).map(|_| rate_limited()).collect();
        let mut s  = ready(ScriptedClient::new(script));

        let bot = s.ask("topic").unwrap().clone();
        assert!(bot.is_failure());
        assert!(bot.failure.unwrap().contains("rate limit"));
    }

    #[test]
    fn test_reading_history_is_idempotent() {
        let mut s = ready(ScriptedClient::always("card", 1));
        s.ask("topic").unwrap();

        let first: Vec<Turn>  = s.history().iter().cloned().collect();
        let second: Vec<Turn> = s.history().iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.responder().client().calls(), 1);
    }

    #[test]
    fn test_current_flashcard_follows_history() {
        let mut s = ready(ScriptedClient::new(vec![Ok("first card".into()), server_error()]));
        assert_eq!(s.current_flashcard(), None);

        s.ask("topic").unwrap();
        assert_eq!(s.current_flashcard(), s.history().last_bot().map(|t| t.content.as_str()));
        assert_eq!(s.current_flashcard(), Some("first card"));

        // a failed generation still becomes the card to simplify
        s.ask("another topic").unwrap();
        assert_eq!(s.current_flashcard(), Some("Error generating response."));
    }

    #[test]
    fn test_history_survives_document_reload() {
        let mut s = ready(ScriptedClient::always("card", 1));
        s.ask("topic").unwrap();

        s.load_document(Document::new("other.pdf", 1, "Birds lay eggs."));
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.history().len(), 2);
    }
}
