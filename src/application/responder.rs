// ============================================================
// Layer 2 — Responder
// ============================================================
// Turns (document text, query, API key) into one flashcard:
//
//   Step 1: Keep the first 1500 chars of the document   (Layer 4)
//   Step 2: Fill the flashcard prompt template          (Layer 3)
//   Step 3: Send one single-message completion request  (Layer 6)
//   Step 4: Return the trimmed completion text
//
// On failure:
//   - rate limited  → warn, sleep a fixed delay, try again,
//                     at most `max_retries` times, then give up
//                     with RateLimitExceeded
//   - anything else → log it and return Remote, no retry
//
// Each call is stateless from the API's point of view: no chat
// history is sent, only the prompt.

use std::thread;
use std::time::Duration;

use crate::application::config::FlashcardConfig;
use crate::data::excerpt::Excerpter;
use crate::domain::errors::ResponderError;
use crate::domain::prompt::build_prompt;
use crate::domain::traits::CompletionClient;

/// How rate-limited calls are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 0 means never retry
    pub max_retries: u32,

    /// Fixed pause before every retry
    pub delay: Duration,
}

/// Passed to the retry hook just before the Responder sleeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryNotice {
    /// 1 for the first retry, 2 for the second, ...
    pub retry:       u32,
    pub max_retries: u32,
    pub delay:       Duration,
    pub reason:      String,
}

type RetryHook = Box<dyn Fn(&RetryNotice)>;

/// Generates flashcards through a CompletionClient.
pub struct Responder<C> {
    client:    C,
    model:     String,
    excerpter: Excerpter,
    retry:     RetryPolicy,
    on_retry:  Option<RetryHook>,
}

impl<C: CompletionClient> Responder<C> {
    pub fn new(client: C, config: &FlashcardConfig) -> Self {
        Self {
            client,
            model:     config.model.clone(),
            excerpter: Excerpter::new(config.max_context_chars),
            retry:     config.retry_policy(),
            on_retry:  None,
        }
    }

    /// Call `hook` every time a rate-limited request is about to be retried.
    pub fn with_retry_hook(mut self, hook: impl Fn(&RetryNotice) + 'static) -> Self {
        self.on_retry = Some(Box::new(hook));
        self
    }

    /// Replace the retry policy taken from the config.
    #[cfg(test)]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    #[cfg(test)]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The exact prompt `generate` would send for these inputs.
    pub fn prompt_for(&self, document_text: &str, query: &str) -> String {
        build_prompt(self.excerpter.excerpt(document_text), query)
    }

    /// Generate one flashcard for `query` from `document_text`.
    pub fn generate(&self, document_text: &str, query: &str, api_key: &str) -> Result<String, ResponderError> {
        let prompt      = self.prompt_for(document_text, query);
        let mut retries = 0u32;

        loop {
            match self.client.complete(api_key, &self.model, &prompt) {
                Ok(text) => {
                    tracing::debug!("Flashcard generated after {} retries", retries);
                    return Ok(text.trim().to_string());
                }

                Err(e) if e.is_rate_limit() => {
                    let reason = e.to_string();
                    if retries >= self.retry.max_retries {
                        tracing::error!("Rate limit still exceeded after {} attempts: {}", retries + 1, reason);
                        return Err(ResponderError::RateLimitExceeded { attempts: retries + 1 });
                    }
                    retries += 1;

                    let notice = RetryNotice {
                        retry:       retries,
                        max_retries: self.retry.max_retries,
                        delay:       self.retry.delay,
                        reason,
                    };
                    tracing::warn!(
                        "Rate limit reached, retry {}/{} in {:?}: {}",
                        notice.retry,
                        notice.max_retries,
                        notice.delay,
                        notice.reason
                    );
                    if let Some(hook) = &self.on_retry {
                        hook(&notice);
                    }

                    thread::sleep(self.retry.delay);
                }

                Err(e) => {
                    tracing::error!("Error during completion API call: {}", e);
                    return Err(ResponderError::Remote(e));
                }
            }
        }
    }
}
