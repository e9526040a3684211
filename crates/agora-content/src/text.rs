//! Plain-text extraction from rich topic bodies.
//!
//! Walks `pulldown-cmark` events and collects only readable text: headings,
//! paragraphs, link text, inline code, and the text content of code fences.
//! Raw HTML (block or inline) is stripped to its text content and any HTML
//! entities it carries are decoded, so the output holds exactly one level of
//! escaping once the caller re-escapes it.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

use crate::escape::decode_entities;

/// Extract plain text from markdown content, stripping all formatting.
///
/// Removes heading markers, emphasis, links, images, and HTML tags. Code
/// fences and inline code are collapsed to their text content. Whitespace
/// is normalized to single spaces.
///
/// # Example
///
/// ```
/// use agora_content::text::extract_plain_text;
///
/// let content = "# Title\n\nSome **bold** text with a [link](https://x).";
/// assert_eq!(extract_plain_text(content), "Title Some bold text with a link.");
/// ```
pub fn extract_plain_text(content: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex");

    let parser = Parser::new(content);
    let mut text = String::new();

    for event in parser {
        match event {
            // Adjacent inline events join directly. The parser splits text at
            // entity and markup boundaries, so any separator injected here
            // would land inside what the author wrote as one word.
            Event::Text(chunk) | Event::Code(chunk) => {
                text.push_str(&chunk);
            }
            // Tag stripping can leave chunks that need separating from the
            // surrounding text. Raw tags never survive into the output, so
            // a repeated pass never reaches this arm.
            Event::Html(chunk) | Event::InlineHtml(chunk) => {
                let stripped = tag_re.replace_all(&chunk, " ");
                let decoded = decode_entities(&stripped);
                if !decoded.trim().is_empty() {
                    push_separated(&mut text, decoded.trim());
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            Event::Start(Tag::CodeBlock(_)) | Event::End(TagEnd::CodeBlock) => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    normalize_whitespace(&text)
}

fn push_separated(text: &mut String, chunk: &str) {
    if !text.is_empty() && !text.ends_with(' ') && !chunk.starts_with(|c: char| c.is_ascii_punctuation()) {
        text.push(' ');
    }
    text.push_str(chunk);
}

/// Normalize whitespace: collapse runs of whitespace, trim the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(extract_plain_text("just words"), "just words");
    }

    #[test]
    fn test_strips_emphasis() {
        let out = extract_plain_text("Some **bold** and *italic* text.");
        assert_eq!(out, "Some bold and italic text.");
    }

    #[test]
    fn test_heading_text_kept() {
        let out = extract_plain_text("# Title\n\nBody text.");
        assert_eq!(out, "Title Body text.");
    }

    #[test]
    fn test_link_collapsed_to_text() {
        let out = extract_plain_text("see [the docs](https://example.com) here");
        assert_eq!(out, "see the docs here");
        assert!(!out.contains("example.com"));
    }

    #[test]
    fn test_code_fence_text_kept() {
        let out = extract_plain_text("before\n\n```rust\nlet x = 1;\n```\n\nafter");
        assert!(out.contains("let x = 1;"));
        assert!(!out.contains("```"));
        assert!(!out.contains("rust"));
    }

    #[test]
    fn test_inline_code_kept() {
        let out = extract_plain_text("call `foo()` twice");
        assert_eq!(out, "call foo() twice");
    }

    #[test]
    fn test_html_tags_stripped() {
        let out = extract_plain_text("a <b>bold</b> move");
        assert_eq!(out, "a bold move");
    }

    #[test]
    fn test_html_block_stripped() {
        let out = extract_plain_text("<div class=\"x\">\ninner text\n</div>");
        assert!(out.contains("inner text"));
        assert!(!out.contains('<'));
    }

    #[test]
    fn test_html_entities_decoded() {
        // Entities in markdown text are resolved by the parser; entities in
        // raw HTML chunks are decoded explicitly.
        assert_eq!(extract_plain_text("a &amp; b"), "a & b");
        assert_eq!(extract_plain_text("<span>a &amp; b</span>"), "a & b");
    }

    #[test]
    fn test_entity_split_chunks_join_without_space() {
        // The parser yields a resolved entity and its neighbouring words as
        // separate text events; they must join back exactly as written.
        assert_eq!(
            extract_plain_text("quotes &#34;double&#34; and &#39;single&#39;"),
            "quotes \"double\" and 'single'"
        );
        assert_eq!(extract_plain_text("a &amp; b &lt;tag&gt;"), "a & b <tag>");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let out = extract_plain_text("one\n\ntwo\n\n\nthree");
        assert_eq!(out, "one two three");
    }

    #[test]
    fn test_list_items_separated() {
        let out = extract_plain_text("- alpha\n- beta\n");
        assert_eq!(out, "alpha beta");
    }
}
