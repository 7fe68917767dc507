//! Runner error formatting helpers.

use serde_json::Value as JsonValue;

/// Converts one raw runner error object into human-readable text.
///
/// The test runner owns the error shapes, so formatting stays on its side of
/// the boundary; the session only cleans the result before sending it.
pub trait ErrorFormatter {
    fn format_error(&self, err: &JsonValue) -> String;
}

/// Strip ANSI/terminal escape sequences from formatted error text.
///
/// Runner formatters tend to colorize for console output; the reporting
/// service stores the text verbatim, so the escapes must go.
pub fn clean_error_text(raw: &str) -> String {
    console::strip_ansi_codes(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_escapes() {
        let colored = "\u{1b}[31mexpected true\u{1b}[0m to be false";
        assert_eq!(clean_error_text(colored), "expected true to be false");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_error_text("plain message"), "plain message");
    }

    #[test]
    fn test_strips_cursor_and_style_sequences() {
        let raw = "\u{1b}[1m\u{1b}[4mAssertionError\u{1b}[24m\u{1b}[22m: boom";
        assert_eq!(clean_error_text(raw), "AssertionError: boom");
    }
}
