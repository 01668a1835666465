// ============================================================
// Layer 3 — Flashcard Prompt
// ============================================================
// The prompt is a fixed template with two slots:
//   {document}  — the (already truncated) document excerpt
//   {query}     — the user's question or topic, verbatim
//
// Rendering is a pure function of its inputs. Slots are filled
// in a single left-to-right pass, so placeholder-looking text
// inside the document or the query is copied through untouched.

/// Template used for every flashcard request.
pub const FLASHCARD_PROMPT_TEMPLATE: &str = concat!(
    "You are a chatbot that helps users learn topics from a given document by creating flashcards. ",
    "The document content is as follows:\n\n'{document}'\n\n",
    "User's question or topic: '{query}'\n",
    "Create a flashcard with a question and answer based on the document content."
);

/// Query sent when the user says they did not understand the last card.
pub const SIMPLIFY_QUERY: &str = "Please simplify the last flashcard.";

/// Build the flashcard prompt from the default template.
pub fn build_prompt(excerpt: &str, query: &str) -> String {
    render_template(FLASHCARD_PROMPT_TEMPLATE, excerpt, query)
}

/// Fill `{document}` and `{query}` in `template`.
/// Unknown `{...}` sequences are kept as written.
pub fn render_template(template: &str, excerpt: &str, query: &str) -> String {
    let mut out  = String::with_capacity(template.len() + excerpt.len() + query.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];

        if let Some(tail) = after.strip_prefix("{document}") {
            out.push_str(excerpt);
            rest = tail;
        } else if let Some(tail) = after.strip_prefix("{query}") {
            out.push_str(query);
            rest = tail;
        } else {
            out.push('{');
            rest = &after[1..];
        }
    }

    out.push_str(rest);
    out
}
