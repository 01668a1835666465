// ============================================================
// Layer 4 — PDF Loader (the Extractor)
// ============================================================
// Turns a PDF into one string using the lopdf crate.
//
// How lopdf sees a PDF:
//   Document
//     └── page tree  (get_pages() → page number → object id)
//           └── content stream per page
//                 └── text operators (Tj / TJ) → the words
//
// lopdf does the decoding for us: extract_text(&[n]) returns the
// text of page n. We ask for each page in order and append the
// results with no separator.
//
// Failure rules:
//   - file missing / unreadable        → ExtractError::Io
//   - bytes are not a loadable PDF     → ExtractError::Parse
//   - encrypted PDF                    → ExtractError::Parse
//   - one page has no extractable text → contributes "" and we go on
//
// Reference: lopdf crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, path::Path};

use lopdf::Document as PdfDocument;

use crate::domain::document::Document;
use crate::domain::errors::ExtractError;
use crate::domain::traits::PageSource;

/// Loads PDF files into Documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and extract a PDF from disk
    pub fn load_path(&self, path: &Path) -> Result<Document, ExtractError> {
        let bytes = fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Use the filename as the source identifier
        let source = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        self.load_bytes(source, &bytes)
    }

    /// Extract a PDF that is already in memory (e.g. an upload)
    pub fn load_bytes(&self, source: impl Into<String>, bytes: &[u8]) -> Result<Document, ExtractError> {
        let source = source.into();

        let pdf = PdfDocument::load_mem(bytes).map_err(|e| ExtractError::Parse {
            source_name: source.clone(),
            reason:      e.to_string(),
        })?;

        if pdf.is_encrypted() {
            return Err(ExtractError::Parse {
                source_name: source,
                reason:      "document is encrypted".to_string(),
            });
        }

        let pages = PdfPages::new(&pdf);
        let text  = concatenate_pages(&pages);

        let doc = Document::new(source, pages.page_count(), text);
        if doc.is_empty() {
            tracing::warn!("'{}' has no extractable text (scanned or image-only?)", doc.source);
        }

        tracing::info!(
            "Loaded '{}': {} pages, {} chars",
            doc.source,
            doc.page_count,
            doc.char_count()
        );

        Ok(doc)
    }
}

/// Append every page's text, in page order, with no separator.
/// Pages without text contribute nothing. Zero pages → "".
pub fn concatenate_pages<P: PageSource + ?Sized>(pages: &P) -> String {
    let mut text = String::new();

    for index in 0..pages.page_count() {
        if let Some(page) = pages.page_text(index) {
            text.push_str(&page);
        }
    }

    text
}

// ─── lopdf adapter ────────────────────────────────────────────────────────────
/// A loaded lopdf document viewed as a PageSource.
struct PdfPages<'a> {
    pdf:          &'a PdfDocument,
    /// PDF page numbers (1-based) in reading order
    page_numbers: Vec<u32>,
}

impl<'a> PdfPages<'a> {
    fn new(pdf: &'a PdfDocument) -> Self {
        // get_pages() is a BTreeMap keyed by page number, so
        // iterating its keys already yields reading order
        let page_numbers = pdf.get_pages().keys().copied().collect();
        Self { pdf, page_numbers }
    }
}

impl PageSource for PdfPages<'_> {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Option<String> {
        let number = *self.page_numbers.get(index)?;

        // lopdf ends every text object (ET) with a newline; drop the
        // one closing the page so pages join with no separator
        match self.pdf.extract_text(&[number]) {
            Ok(mut text) => {
                if text.ends_with('\n') {
                    text.pop();
                }
                Some(text)
            }
            Err(e) => {
                tracing::debug!("Page {} has no extractable text: {}", number, e);
                None
            }
        }
    }
}
