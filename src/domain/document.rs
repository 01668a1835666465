// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single PDF loaded into the session.
// A plain data struct: where it came from, how many pages it
// had, and the concatenated text of those pages.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A document whose text has already been extracted.
/// The text never changes after the Extractor produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The filename or path, kept for log messages
    pub source: String,

    /// Number of pages the PDF declared
    pub page_count: usize,

    /// Every page's text, in page order, with no separator
    pub text: String,
}

impl Document {
    /// Create a new Document.
    ///
    /// Example:
    ///   let doc = Document::new("notes.pdf", 2, "Cats are mammals.Dogs are mammals too.");
    pub fn new(source: impl Into<String>, page_count: usize, text: impl Into<String>) -> Self {
        Self {
            source:     source.into(),
            page_count,
            text:       text.into(),
        }
    }

    /// Number of characters (not bytes) in the extracted text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
