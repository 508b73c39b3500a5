//! Deterministic whitespace/punctuation tokenizer.
//!
//! The embedding model's own tokenizer is not available to this component (it lives behind the
//! external API), so `token_count` is defined against this splitter instead: contiguous
//! alphanumeric runs are one token each, contiguous runs of other non-whitespace characters
//! (punctuation, symbols) are one token each, and whitespace is a separator only. This is
//! deterministic for a given input, which is the only property the contract requires.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let is_word_char = c.is_alphanumeric();
        let mut end = start + c.len_utf8();
        chars.next();

        while let Some(&(idx, next)) = chars.peek() {
            if next.is_whitespace() || next.is_alphanumeric() != is_word_char {
                break;
            }
            end = idx + next.len_utf8();
            chars.next();
        }

        tokens.push(&text[start..end]);
    }

    tokens
}
