// ============================================================
// Layer 3 — Chat Turns and History
// ============================================================
// A Turn is one bubble in the chat: who said it and what.
// History is the ordered list of Turns for one session.
//
// History only grows, and only in (user, bot) pairs:
//   push_exchange() is the single way to add Turns, so a bot
//   Turn can never appear without the user Turn that caused it.
//
// A bot Turn can record that generation failed. Its content is
// then the placeholder text the user sees, and `failure` holds
// the reason, so callers never have to compare strings.
//
// Reference: Rust Book §6 (Enums), §8 (Vectors)

use serde::{Deserialize, Serialize};

/// Who produced a Turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One role-tagged message in the chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,

    /// The text shown to the user
    pub content: String,

    /// Set only on bot Turns whose generation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl Turn {
    /// A query typed (or synthesised) on the user's behalf
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), failure: None }
    }

    /// A flashcard returned by the model
    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: Role::Bot, content: content.into(), failure: None }
    }

    /// A bot Turn standing in for a flashcard that could not be generated
    pub fn bot_failure(placeholder: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            role:    Role::Bot,
            content: placeholder.into(),
            failure: Some(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Append-only chat history owned by one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user Turn and the bot Turn that answered it.
    /// Returns the bot Turn as stored.
    pub fn push_exchange(&mut self, user: Turn, bot: Turn) -> &Turn {
        debug_assert_eq!(user.role, Role::User);
        debug_assert_eq!(bot.role, Role::Bot);
        self.turns.push(user);
        self.turns.push(bot);
        &self.turns[self.turns.len() - 1]
    }

    #[cfg(test)]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent bot Turn, if any exchange has happened yet
    pub fn last_bot(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.role == Role::Bot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}
