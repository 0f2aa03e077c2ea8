//! Text-safety transforms for embedding cell text in markup.
//!
//! Two pure passes are provided: markup escaping and line-break
//! normalization. When both are needed they always run in that order, so a
//! literal `<br>` typed into the data is escaped before real break markers
//! are inserted and can never be mistaken for one.

/// Default marker inserted for each line break.
pub const BREAK_MARKER: &str = "<br>";

/// Escape the five markup-significant characters.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replace every CRLF, LF or lone CR with `marker`.
///
/// A CRLF pair counts as a single break.
pub fn normalize_breaks(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(marker);
            }
            '\n' => out.push_str(marker),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape `text` for a table cell, optionally converting line breaks.
pub fn escape_cell(text: &str, newline_to_break: bool, marker: &str) -> String {
    let escaped = escape_markup(text);
    if newline_to_break {
        normalize_breaks(&escaped, marker)
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_all_entities() {
        assert_eq!(
            escape_markup(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_markup_plain_text_untouched() {
        assert_eq!(escape_markup("plain text 123"), "plain text 123");
        assert_eq!(escape_markup(""), "");
    }

    #[test]
    fn test_normalize_breaks_variants() {
        assert_eq!(normalize_breaks("a\r\nb\nc\rd", "<br>"), "a<br>b<br>c<br>d");
        // CRLF is one break, LF CR is two
        assert_eq!(normalize_breaks("a\n\rb", "|"), "a||b");
        assert_eq!(normalize_breaks("trailing\n", "<br>"), "trailing<br>");
    }

    #[test]
    fn test_escape_cell_escapes_before_breaks() {
        // A literal <br> in the data must stay escaped
        assert_eq!(
            escape_cell("<br>\nline", true, BREAK_MARKER),
            "&lt;br&gt;<br>line"
        );
    }

    #[test]
    fn test_escape_cell_without_breaks() {
        assert_eq!(escape_cell("a\nb & c", false, BREAK_MARKER), "a\nb &amp; c");
    }
}
