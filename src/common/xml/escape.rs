use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static HTML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build HTML escaper")
});

const HTML_REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

#[inline]
fn needs_escaping(bytes: &[u8]) -> bool {
    memchr::memchr3(b'&', b'<', b'>', bytes).is_some() || memchr::memchr2(b'"', b'\'', bytes).is_some()
}

/// Escape HTML special characters for use in text or attribute values.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_html;
/// assert_eq!(escape_html("a & b"), "a &amp; b");
/// assert_eq!(escape_html("<b title=\"x\">"), "&lt;b title=&quot;x&quot;&gt;");
/// ```
#[inline]
pub fn escape_html(s: &str) -> String {
    if !needs_escaping(s.as_bytes()) {
        return s.to_string();
    }
    HTML_ESCAPER.replace_all(s, &HTML_REPLACEMENTS)
}

/// Escape text and keep significant whitespace visible.
///
/// Leading and trailing spaces, and every space that follows another space,
/// become `&nbsp;` so a browser does not collapse them.
///
/// # Examples
///
/// ```
/// use longan::common::xml::escape_html_preserving_spaces;
/// assert_eq!(escape_html_preserving_spaces("a  b"), "a &nbsp;b");
/// assert_eq!(escape_html_preserving_spaces(" x "), "&nbsp;x&nbsp;");
/// ```
pub fn escape_html_preserving_spaces(s: &str) -> String {
    let escaped = escape_html(s);
    if !escaped.starts_with(' ') && !escaped.ends_with(' ') && !escaped.contains("  ") {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    let last = escaped.len().saturating_sub(1);
    let mut prev_space = true;
    for (i, ch) in escaped.char_indices() {
        if ch == ' ' {
            if prev_space || i == last {
                out.push_str("&nbsp;");
            } else {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_plain_is_unchanged() {
        assert_eq!(escape_html("plain text"), "plain text");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_preserve_spaces() {
        assert_eq!(escape_html_preserving_spaces("one two"), "one two");
        assert_eq!(escape_html_preserving_spaces("a   b"), "a &nbsp;&nbsp;b");
        assert_eq!(escape_html_preserving_spaces(" "), "&nbsp;");
        assert_eq!(escape_html_preserving_spaces("x & y "), "x &amp; y&nbsp;");
    }
}
