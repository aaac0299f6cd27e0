//! Char-level string helpers shared by the normalizer stages.

use std::sync::LazyLock;

use regex::Regex;

/// Leading whitespace run. `\s` is Unicode-aware, so it also matches the
/// no-break space glyph written by the rewriter.
static LEADING_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*").expect("leading whitespace regex must compile"));

/// Length of `s` in chars.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The maximal whitespace prefix of `s` (possibly empty).
pub fn leading_whitespace(s: &str) -> &str {
    LEADING_WS_RE.find(s).map_or("", |m| m.as_str())
}

/// Longest common prefix of two strings, compared char by char.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| {
            // No mismatch: the prefix is the shorter string.
            let shorter = char_len(a).min(char_len(b));
            a.char_indices().nth(shorter).map_or(a.len(), |(i, _)| i)
        });
    &a[..end]
}

/// Right-pad `s` with `fill` until it is `width` chars long. Never truncates.
pub fn pad_end(s: &str, width: usize, fill: char) -> String {
    let len = char_len(s);
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + (width - len) * fill.len_utf8());
    out.push_str(s);
    out.extend(std::iter::repeat_n(fill, width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_whitespace_handles_mixed_runs() {
        assert_eq!(leading_whitespace("  \tfoo bar"), "  \t");
        assert_eq!(leading_whitespace("foo"), "");
        assert_eq!(leading_whitespace(""), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }

    #[test]
    fn leading_whitespace_includes_no_break_space() {
        assert_eq!(leading_whitespace("\u{00A0}\u{00A0}x"), "\u{00A0}\u{00A0}");
    }

    #[test]
    fn common_prefix_stops_at_first_mismatch() {
        assert_eq!(common_prefix("    ", "  \t "), "  ");
        assert_eq!(common_prefix("\t\t", "\t"), "\t");
        assert_eq!(common_prefix("\t", "  "), "");
        assert_eq!(common_prefix("", "  "), "");
    }

    #[test]
    fn common_prefix_respects_char_boundaries() {
        let a = "\u{00A0}\u{00A0}\u{00A0}";
        let b = "\u{00A0}\u{00A0}";
        assert_eq!(common_prefix(a, b), b);
        assert_eq!(common_prefix(b, a), b);
    }

    #[test]
    fn pad_end_fills_to_width() {
        assert_eq!(pad_end("ab", 4, '.'), "ab..");
        assert_eq!(pad_end("abcd", 2, '.'), "abcd");
        assert_eq!(char_len(&pad_end("a", 3, '\u{00A0}')), 3);
    }
}
