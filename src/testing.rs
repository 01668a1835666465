// Test doubles shared by the unit tests of several layers.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::errors::CompletionError;
use crate::domain::traits::CompletionClient;

/// A CompletionClient that replays a fixed script of results and
/// records every prompt it was sent.
#[derive(Default)]
pub struct ScriptedClient {
    script:  RefCell<VecDeque<Result<String, CompletionError>>>,
    prompts: RefCell<Vec<String>>,
    keys:    RefCell<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            ..Self::default()
        }
    }

    /// A client that answers every call with `text`
    pub fn always(text: &str, calls: usize) -> Self {
        Self::new((0..calls).map(|_| Ok(text.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.borrow().clone()
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, api_key: &str, _model: &str, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.keys.borrow_mut().push(api_key.to_string());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected completion call #{}", self.calls()))
    }
}

pub fn rate_limited() -> Result<String, CompletionError> {
    Err(CompletionError::RateLimited("Rate limit reached".to_string()))
}

pub fn server_error() -> Result<String, CompletionError> {
    Err(CompletionError::Api { status: 500, body: "internal error".to_string() })
}
