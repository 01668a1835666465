// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers for one chat session:
//
//   config.rs     — every tunable, with defaults
//   responder.rs  — prompt → completion → bounded retry
//   session.rs    — document + API key + history state machine
//
// Rules for this layer:
//   - No printing (that's Layer 1)
//   - No HTTP or PDF details (those are Layers 4 and 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Tunables for the Responder and HTTP client
pub mod config;

// Flashcard generation with rate-limit retries
pub mod responder;

// The per-session orchestrator
pub mod session;
