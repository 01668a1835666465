// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a PDF on disk and the text that goes into
// a prompt:
//
//   .pdf file
//       │
//       ▼
//   PdfLoader      → opens the PDF, concatenates page text
//       │
//       ▼
//   Excerpter      → keeps the first 1500 characters
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads PDF files and concatenates their page text
pub mod loader;

/// Truncates document text to the prompt's context budget
pub mod excerpt;
