//! HTML entity escaping and decoding.
//!
//! The index stores entity-escaped plain text so it never holds executable
//! markup and highlighting is safe to render verbatim. The escape set matches
//! the conventional minimal HTML set: `& < > " '`.
//!
//! Decoding exists so the normalization pipeline can collapse text to a
//! single escape level: decode whatever entities the input carries, then
//! escape exactly once. That is what makes normalization idempotent.

/// Escape the five HTML-significant characters.
///
/// # Examples
///
/// ```
/// use agora_content::escape::escape_entities;
///
/// assert_eq!(escape_entities("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_entities(r#""quoted""#), "&#34;quoted&#34;");
/// ```
pub fn escape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode the named and numeric entities produced by [`escape_entities`],
/// plus their common aliases (`&quot;`, `&apos;`, `&#x27;`).
///
/// Unknown entities are left untouched.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        // Entities of interest are all ASCII and at most 6 bytes long.
        let decoded = rest.find(';').filter(|&end| end < 8).and_then(|end| match &rest[..=end] {
            "&amp;" => Some(('&', end + 1)),
            "&lt;" => Some(('<', end + 1)),
            "&gt;" => Some(('>', end + 1)),
            "&quot;" | "&#34;" => Some(('"', end + 1)),
            "&apos;" | "&#39;" | "&#x27;" => Some(('\'', end + 1)),
            _ => None,
        });

        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_entities(r#"<a href="x">it's &</a>"#),
            "&lt;a href=&#34;x&#34;&gt;it&#39;s &amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_entities("plain text"), "plain text");
    }

    #[test]
    fn test_decode_reverses_escape() {
        let original = r#"<b>"it's" & more</b>"#;
        assert_eq!(decode_entities(&escape_entities(original)), original);
    }

    #[test]
    fn test_decode_aliases() {
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
        assert_eq!(decode_entities("&apos;x&apos;"), "'x'");
        assert_eq!(decode_entities("&#x27;"), "'");
    }

    #[test]
    fn test_decode_unknown_entity_untouched() {
        assert_eq!(decode_entities("&copy; 2025"), "&copy; 2025");
        assert_eq!(decode_entities("5 & 6"), "5 & 6");
    }

    #[test]
    fn test_decode_trailing_ampersand() {
        assert_eq!(decode_entities("a &"), "a &");
    }

    #[test]
    fn test_double_escape_then_decode_once() {
        // Decoding only collapses one level per pass, matching entity syntax.
        let twice = escape_entities(&escape_entities("&"));
        assert_eq!(twice, "&amp;amp;");
        assert_eq!(decode_entities(&twice), "&amp;");
    }
}
