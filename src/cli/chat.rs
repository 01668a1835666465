// ============================================================
// Layer 1 — Terminal Chat Loop
// ============================================================
// The terminal stand-in for a chat web page:
//
//   1. Ask for the API key if the session has none
//   2. Read a topic or question, print the flashcard
//   3. Ask "Did you understand this flashcard?"
//        yes (or Enter) → next question
//        no             → ask for a simpler card, then ask again
//   4. `history` reprints the transcript, `exit`/`quit` or
//      end of input ends the session
//
// Generic over BufRead/Write so tests can drive it with
// in-memory buffers. Flashcards and prompts go to `out`,
// failure reasons to `err`.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::session::{Session, SessionState};
use crate::domain::traits::CompletionClient;
use crate::domain::turn::{History, Role, Turn};

pub const QUERY_PROMPT: &str = "Enter a topic or question: ";
pub const KEY_PROMPT: &str = "Enter your Groq API key: ";
pub const UNDERSTOOD_PROMPT: &str = "Did you understand this flashcard? [Y/n]: ";

/// Drive `session` from `input` until the user leaves.
pub fn run_chat<C, R, W, E>(session: &mut Session<C>, input: &mut R, out: &mut W, err: &mut E) -> Result<()>
where
    C: CompletionClient,
    R: BufRead,
    W: Write,
    E: Write,
{
    if session.state() == SessionState::DocumentLoaded && !read_credential(session, input, out)? {
        return Ok(());
    }

    writeln!(out, "Type 'exit' or 'quit' to end the session, 'history' to see the chat so far.")?;

    'session: loop {
        let Some(line) = prompt_line(input, out, QUERY_PROMPT)? else {
            break;
        };

        match line.to_ascii_lowercase().as_str() {
            ""              => continue,
            "exit" | "quit" => break,
            "history"       => {
                render_history(out, err, session.history())?;
                continue;
            }
            _ => {}
        }

        let turn = session.ask(&line)?;
        render_turn(out, err, turn)?;

        // Keep asking about the latest card until the user gets it
        loop {
            let Some(answer) = prompt_line(input, out, UNDERSTOOD_PROMPT)? else {
                break 'session;
            };
            match parse_yes_no(&answer) {
                Some(true)  => break,
                Some(false) => {
                    if let Some(turn) = session.signal_understanding(false)? {
                        render_turn(out, err, turn)?;
                    }
                }
                None => writeln!(out, "Please answer yes or no.")?,
            }
        }
    }

    let cards = session.history().iter().filter(|t| t.role == Role::Bot).count();
    writeln!(out, "Session ended after {cards} flashcard(s).")?;
    tracing::info!("Chat session ended with {} turns", session.history().len());
    Ok(())
}

/// Ask for the API key until one is accepted.
/// Returns false if input ended first.
fn read_credential<C, R, W>(session: &mut Session<C>, input: &mut R, out: &mut W) -> Result<bool>
where
    C: CompletionClient,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(key) = prompt_line(input, out, KEY_PROMPT)? else {
            return Ok(false);
        };
        match session.set_credential(key) {
            Ok(())  => return Ok(true),
            Err(e)  => writeln!(out, "{e}")?,
        }
    }
}

/// Print `prompt`, read one line, trim it. `None` at end of input.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Enter counts as yes
fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no"       => Some(false),
        _                => None,
    }
}

/// Print one Turn as a chat bubble; a failed card's reason goes to `err`
pub fn render_turn<W: Write, E: Write>(out: &mut W, err: &mut E, turn: &Turn) -> Result<()> {
    match turn.role {
        Role::User => writeln!(out, "You: {}", turn.content)?,
        Role::Bot  => {
            writeln!(out, "Flashcard:\n{}\n", turn.content)?;
            if let Some(reason) = &turn.failure {
                out.flush()?;
                writeln!(err, "error: {reason}")?;
            }
        }
    }
    Ok(())
}

/// Print the whole transcript. Read-only.
pub fn render_history<W: Write, E: Write>(out: &mut W, err: &mut E, history: &History) -> Result<()> {
    if history.is_empty() {
        writeln!(out, "(no flashcards yet)")?;
    }
    for turn in history.iter() {
        render_turn(out, err, turn)?;
    }
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::FlashcardConfig;
    use crate::application::responder::{Responder, RetryPolicy};
    use crate::domain::document::Document;
    use crate::testing::{server_error, ScriptedClient};
    use std::io::Cursor;
    use std::time::Duration;

    fn loaded(client: ScriptedClient) -> Session<ScriptedClient> {
        let responder = Responder::new(client, &FlashcardConfig::default())
            .with_retry_policy(RetryPolicy { max_retries: 1, delay: Duration::ZERO });
        let mut s = Session::new(responder);
        s.load_document(Document::new("animals.pdf", 2, "Cats are mammals.Dogs are mammals too."));
        s
    }

    /// Run the chat over `script`; returns (stdout, stderr) text
    fn drive(session: &mut Session<ScriptedClient>, script: &str) -> (String, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out   = Vec::new();
        let mut err   = Vec::new();
        run_chat(session, &mut input, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_full_session_with_simplify() {
        let mut s = loaded(ScriptedClient::new(vec![Ok("hard card".into()), Ok("easy card".into())]));

        let (out, _) = drive(&mut s, "gsk_test\nWhat are cats?\nno\nyes\nexit\n");

        assert_eq!(s.state(), SessionState::Ready);
        let turns = s.history().turns();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0], Turn::user("What are cats?"));
        assert_eq!(turns[1], Turn::bot("hard card"));
        assert_eq!(turns[2], Turn::user("Please simplify the last flashcard."));
        assert_eq!(turns[3], Turn::bot("easy card"));

        assert!(out.contains(KEY_PROMPT));
        assert!(out.contains("Flashcard:\nhard card"));
        assert!(out.contains("Flashcard:\neasy card"));
        assert!(out.contains("Session ended after 2 flashcard(s)."));
    }

    #[test]
    fn test_history_command_makes_no_calls() {
        let mut s = loaded(ScriptedClient::always("card", 1));

        let (out, _) = drive(&mut s, "gsk_test\ntopic\n\nhistory\nhistory\nquit\n");

        assert_eq!(s.history().len(), 2);
        assert_eq!(s.responder().client().calls(), 1);
        assert_eq!(out.matches("You: topic").count(), 2);
    }

    #[test]
    fn test_blank_key_is_asked_again() {
        let mut s = loaded(ScriptedClient::default());

        let (out, _) = drive(&mut s, "\n  \ngsk_test\nEXIT\n");

        assert_eq!(out.matches(KEY_PROMPT).count(), 3);
        assert_eq!(s.state(), SessionState::Ready);
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_end_of_input_before_key_ends_quietly() {
        let mut s = loaded(ScriptedClient::default());
        drive(&mut s, "");
        assert_eq!(s.state(), SessionState::DocumentLoaded);
    }

    #[test]
    fn test_failure_is_shown_in_chat() {
        let mut s = loaded(ScriptedClient::new(vec![server_error()]));

        let (out, err) = drive(&mut s, "gsk_test\ntopic\ny\nexit\n");

        assert!(out.contains("Flashcard:\nError generating response."));
        assert!(!out.contains("error during completion API call"));
        assert_eq!(err, "error: error during completion API call: API returned 500: internal error\n");
        assert!(s.history().turns()[1].is_failure());
    }

    #[test]
    fn test_history_replays_failure_reason_on_err() {
        let mut s = loaded(ScriptedClient::new(vec![server_error()]));

        let (out, err) = drive(&mut s, "gsk_test\ntopic\ny\nhistory\nexit\n");

        assert_eq!(out.matches("Flashcard:\nError generating response.").count(), 2);
        assert_eq!(err.matches("error: ").count(), 2);
        assert!(!out.contains("error: "));
    }

    #[test]
    fn test_unclear_answer_is_asked_again() {
        let mut s = loaded(ScriptedClient::always("card", 1));

        let (out, _) = drive(&mut s, "gsk_test\ntopic\nmaybe\n\nexit\n");

        assert!(out.contains("Please answer yes or no."));
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no(""), Some(true));
        assert_eq!(parse_yes_no("Yes"), Some(true));
        assert_eq!(parse_yes_no("N"), Some(false));
        assert_eq!(parse_yes_no("nope"), None);
    }
}
