// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// The parts that touch the outside world:
//
//   completion_client.rs — blocking HTTP client for the chat
//                          completion API; sorts failures into
//                          rate-limit / API / transport errors.
//
//   config_store.rs      — reads FlashcardConfig from a JSON
//                          file given with --config.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// reqwest-backed CompletionClient
pub mod completion_client;

/// JSON config loading
pub mod config_store;
