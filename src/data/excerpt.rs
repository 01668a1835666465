// ============================================================
// Layer 4 — Context Excerpt
// ============================================================
// Cuts the document text down to what fits in one prompt.
//
// The rule is deliberately simple: keep the first N characters
// (Unicode scalar values, never bytes) and drop the rest. No
// summarising, no searching for the "relevant" part.
//
// Reference: Rust Book §8 (Strings in Rust)

/// Default cap on how much document text goes into a prompt
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 1500;

/// Truncates document text to a fixed number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excerpter {
    max_chars: usize,
}

impl Default for Excerpter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_CHARS)
    }
}

impl Excerpter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// The first `max_chars` characters of `text`, borrowed.
    pub fn excerpt<'a>(&self, text: &'a str) -> &'a str {
        // char_indices().nth(n) is the byte offset where char n starts,
        // i.e. the end of the first n chars
        match text.char_indices().nth(self.max_chars) {
            Some((byte_end, _)) => &text[..byte_end],
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_unchanged() {
        let e = Excerpter::default();
        assert_eq!(e.excerpt("Cats are mammals."), "Cats are mammals.");
    }

    #[test]
    fn test_long_text_keeps_exactly_first_1500_chars() {
        let text: String = (0..2000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let out = Excerpter::default().excerpt(&text);

        assert_eq!(out.chars().count(), 1500);
        assert_eq!(out, &text[..1500]);
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        let text = "x".repeat(1500);
        assert_eq!(Excerpter::default().excerpt(&text), text);
    }

    #[test]
    fn test_never_splits_a_multibyte_char() {
        let text = "é".repeat(10);
        let out  = Excerpter::new(3).excerpt(&text);
        assert_eq!(out, "ééé");
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_zero_cap_gives_empty() {
        assert_eq!(Excerpter::new(0).excerpt("anything"), "");
    }
}
