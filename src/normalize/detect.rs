//! Indentation classifier: stage 1 of the normalizer.
//!
//! Detection looks at the whole block, never a single line: every indented
//! line contributes the *change* in indentation relative to the previous
//! indented line, and the most frequent change wins. One odd line therefore
//! cannot flip the result.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{AddedLine, IndentStyle};

/// A run of spaces (capture 1) or a run of tabs at the start of a line.
static INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:( )+|\t+)").expect("indent regex must compile"));

// ---------------------------------------------------------------------------
// Detection result
// ---------------------------------------------------------------------------

/// Outcome of running the heuristic over a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentDetection {
    /// `None` when the text carries no indentation evidence at all.
    pub style: Option<IndentStyle>,
    /// Most common indentation step, in units of `style`.
    pub amount: usize,
}

impl IndentDetection {
    /// The indentation unit as text (`amount` spaces or `amount` tabs).
    pub fn indent_string(&self) -> String {
        match self.style {
            Some(IndentStyle::Space) => " ".repeat(self.amount),
            Some(IndentStyle::Tab) => "\t".repeat(self.amount),
            None => String::new(),
        }
    }
}

/// Accumulated evidence for one `(style, step)` key.
#[derive(Debug, Clone, Copy)]
struct KeyStats {
    style: IndentStyle,
    step: usize,
    used: usize,
    weight: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Detect the dominant indentation of `text`.
///
/// Single-space indents are ignored on the first pass (they are usually
/// alignment, e.g. in block comments). If nothing else is indented, a second
/// pass counts them.
pub fn detect_indent(text: &str) -> IndentDetection {
    let mut stats = collect_indent_stats(text, true);
    if stats.is_empty() {
        stats = collect_indent_stats(text, false);
    }

    match most_used(&stats) {
        Some(key) => IndentDetection {
            style: Some(key.style),
            amount: key.step,
        },
        None => IndentDetection {
            style: None,
            amount: 0,
        },
    }
}

/// Classify the indentation of a block of added lines.
///
/// Line texts are joined with `\n` and run through [`detect_indent`]. When
/// the block has no indentation evidence, the document's style is used if the
/// editor reported one; otherwise the result is [`IndentStyle::Space`], for
/// which the rewriter is length-preserving.
pub fn classify_indentation(
    lines: &[AddedLine],
    document_style: Option<IndentStyle>,
) -> IndentStyle {
    let joined = lines
        .iter()
        .map(|line| line.line_text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    detect_indent(&joined)
        .style
        .or(document_style)
        .unwrap_or(IndentStyle::Space)
}

// ---------------------------------------------------------------------------
// Heuristic internals
// ---------------------------------------------------------------------------

/// Build the per-key usage table. Keys keep first-seen order so that ties
/// resolve deterministically.
fn collect_indent_stats(text: &str, ignore_single_spaces: bool) -> Vec<KeyStats> {
    let mut stats: Vec<KeyStats> = Vec::new();
    let mut previous_size = 0usize;
    let mut previous_style: Option<IndentStyle> = None;
    let mut current_key: Option<(IndentStyle, usize)> = None;

    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }

        let Some(caps) = INDENT_RE.captures(line) else {
            previous_size = 0;
            previous_style = None;
            continue;
        };

        let indent = caps[0].len();
        let style = if caps.get(1).is_some() {
            IndentStyle::Space
        } else {
            IndentStyle::Tab
        };

        if ignore_single_spaces && style == IndentStyle::Space && indent == 1 {
            continue;
        }

        if previous_style != Some(style) {
            previous_size = 0;
        }
        previous_style = Some(style);

        let (used, weight) = if indent == previous_size {
            (0, 1)
        } else {
            current_key = Some((style, indent.abs_diff(previous_size)));
            (1, 0)
        };
        previous_size = indent;

        let Some((key_style, step)) = current_key else {
            continue;
        };
        match stats
            .iter_mut()
            .find(|s| s.style == key_style && s.step == step)
        {
            Some(entry) => {
                entry.used += used;
                entry.weight += weight;
            }
            None => stats.push(KeyStats {
                style: key_style,
                step,
                used: 1,
                weight: 0,
            }),
        }
    }

    stats
}

/// Highest use count wins; ties go to the higher weight, then to the key seen
/// first.
fn most_used(stats: &[KeyStats]) -> Option<KeyStats> {
    let mut best: Option<KeyStats> = None;
    for entry in stats {
        let better = match best {
            None => true,
            Some(b) => entry.used > b.used || (entry.used == b.used && entry.weight > b.weight),
        };
        if better {
            best = Some(*entry);
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block(texts: &[&str]) -> Vec<AddedLine> {
        texts.iter().map(|t| AddedLine::plain(*t)).collect()
    }

    #[test]
    fn detects_four_space_indentation() {
        let text = "fn main() {\n    let x = 1;\n    if x {\n        go();\n    }\n}";
        let detected = detect_indent(text);
        assert_eq!(detected.style, Some(IndentStyle::Space));
        assert_eq!(detected.amount, 4);
        assert_eq!(detected.indent_string(), "    ");
    }

    #[test]
    fn detects_tab_indentation() {
        let text = "\thello\n\t\tworld\n\tagain";
        let detected = detect_indent(text);
        assert_eq!(detected.style, Some(IndentStyle::Tab));
        assert_eq!(detected.amount, 1);
        assert_eq!(detected.indent_string(), "\t");
    }

    #[test]
    fn no_indentation_yields_no_style() {
        let detected = detect_indent("a\nb\nc");
        assert_eq!(detected.style, None);
        assert_eq!(detected.amount, 0);
        assert_eq!(detected.indent_string(), "");
    }

    #[test]
    fn empty_text_yields_no_style() {
        assert_eq!(detect_indent("").style, None);
    }

    #[test]
    fn single_anomalous_line_does_not_flip_result() {
        let text = "\ta\n\t\tb\n\tc\n\t\td\n  e";
        assert_eq!(detect_indent(text).style, Some(IndentStyle::Tab));
    }

    #[test]
    fn single_spaces_ignored_when_other_evidence_exists() {
        let text = "/**\n * doc\n * more\n */\n\tbody();";
        assert_eq!(detect_indent(text).style, Some(IndentStyle::Tab));
    }

    #[test]
    fn single_spaces_counted_when_nothing_else() {
        let detected = detect_indent("a\n b\n c");
        assert_eq!(detected.style, Some(IndentStyle::Space));
        assert_eq!(detected.amount, 1);
    }

    #[test]
    fn repeated_indent_adds_weight_to_previous_step() {
        // Two 2-space steps vs one 4-space step, plus repeated lines at 2.
        let text = "a\n  b\n  c\n  d\n    e\nf\n    g";
        let detected = detect_indent(text);
        assert_eq!(detected.style, Some(IndentStyle::Space));
        assert_eq!(detected.amount, 2);
    }

    #[test]
    fn classify_prefers_block_evidence_over_document() {
        let lines = block(&["\tfoo", "\t\tbar"]);
        assert_eq!(
            classify_indentation(&lines, Some(IndentStyle::Space)),
            IndentStyle::Tab
        );
    }

    #[test]
    fn classify_falls_back_to_document_style() {
        let lines = block(&["foo", "bar"]);
        assert_eq!(
            classify_indentation(&lines, Some(IndentStyle::Tab)),
            IndentStyle::Tab
        );
    }

    #[test]
    fn classify_defaults_to_space() {
        assert_eq!(classify_indentation(&[], None), IndentStyle::Space);
        let lines = block(&["foo"]);
        assert_eq!(classify_indentation(&lines, None), IndentStyle::Space);
    }
}
