//! HTML-to-plain-text extraction.
//!
//! Full documents (anything containing an `<html` or `<body` tag) are handed to
//! [`dom_smoothie`], the same readability extractor the ingestion pipeline already depends on
//! for turning raw pages into article text. Bare fragments (common in tests and in
//! already-extracted snippets) skip the readability heuristics, which are tuned to pick out
//! "the main article" among navigation chrome and ads, and can discard a lone paragraph with no
//! surrounding document structure) and go through a plain tag-stripping pass instead.
use dom_smoothie::{Config, Readability, TextMode};

pub fn strip_html(html: &str) -> String {
    let looks_like_document =
        html.to_ascii_lowercase().contains("<html") || html.to_ascii_lowercase().contains("<body");

    if looks_like_document {
        if let Some(text) = extract_with_readability(html) {
            if !text.trim().is_empty() {
                return collapse_whitespace(&text);
            }
        }
    }

    collapse_whitespace(&strip_tags(html))
}

fn extract_with_readability(html: &str) -> Option<String> {
    let config = Config {
        text_mode: TextMode::Plain,
        ..Default::default()
    };
    let mut readability = Readability::new(html, None, Some(config)).ok()?;
    let article = readability.parse().ok()?;
    Some(article.text_content.into_owned())
}

/// Drop `<script>`/`<style>` bodies and all remaining tags, leaving plain text.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.char_indices().peekable();
    let lower = html.to_ascii_lowercase();

    while let Some((i, c)) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        if let Some(skip_to) = skip_tag_body(&lower, i, "script").or_else(|| skip_tag_body(&lower, i, "style")) {
            while let Some((j, _)) = chars.peek() {
                if *j >= skip_to {
                    break;
                }
                chars.next();
            }
            continue;
        }

        for (_, c) in chars.by_ref() {
            if c == '>' {
                break;
            }
        }
    }

    out
}

/// If `lower[at..]` opens a `<tag ...>...</tag>` block, returns the byte offset just past its
/// closing tag; otherwise `None`.
fn skip_tag_body(lower: &str, at: usize, tag: &str) -> Option<usize> {
    let open = format!("<{tag}");
    if !lower[at..].starts_with(&open) {
        return None;
    }
    let close = format!("</{tag}>");
    let close_pos = lower[at..].find(&close)?;
    Some(at + close_pos + close.len())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_from_fragment() {
        let text = strip_html("<p>Hello <b>world</b>.</p>");
        assert_eq!(text, "Hello world.");
    }

    #[test]
    fn drops_script_and_style_bodies() {
        let html = "<div><script>alert('x')</script><style>.a{color:red}</style>Visible</div>";
        assert_eq!(strip_html(html), "Visible");
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(strip_html(""), "");
        assert_eq!(strip_html("<html><body></body></html>"), "");
    }

    #[test]
    fn preserves_exact_token_count_for_fragment_word_list() {
        let words: Vec<String> = (0..1000).map(|i| format!("w{i}")).collect();
        let html = format!("<p>{}</p>", words.join(" "));
        let text = strip_html(&html);
        assert_eq!(text.split_whitespace().count(), 1000);
    }
}
