// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the core
// concepts: documents, chat turns, the prompt, and errors.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO clap, reqwest or lopdf types
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A document whose text has been extracted
pub mod document;

// Role-tagged chat turns and the append-only history
pub mod turn;

// The flashcard prompt template and its renderer
pub mod prompt;

// Typed errors for extraction, completion and responding
pub mod errors;

// Seams implemented by the data and infra layers
pub mod traits;
