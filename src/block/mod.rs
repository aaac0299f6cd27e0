//! Added-lines block model.
//!
//! An [`AddedLine`] pairs one inserted line of text with the highlighted
//! sub-spans inside it. A block is a plain `Vec<AddedLine>` in render order.
//!
//! All offsets are char (Unicode scalar value) offsets into `line_text`,
//! half-open `[start, end)`. The glyph unit used for indentation is
//! multi-byte in UTF-8, so byte offsets would drift after every rewrite.

pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::BlockError;

/// Default glyph unit: U+00A0 NO-BREAK SPACE.
pub const UNICODE_SPACE: char = '\u{00A0}';

// ---------------------------------------------------------------------------
// Highlight ranges
// ---------------------------------------------------------------------------

/// A highlighted span inside a line, `[start, end)` in chars.
///
/// Serialized as a two-element array (`[2, 5]`) to match the editor's
/// decoration records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for HighlightRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<HighlightRange> for (usize, usize) {
    fn from(range: HighlightRange) -> Self {
        (range.start, range.end)
    }
}

// ---------------------------------------------------------------------------
// Added line
// ---------------------------------------------------------------------------

/// One inserted line plus its highlight ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedLine {
    /// Line content without a terminator.
    pub line_text: String,
    /// Ordered highlight spans, relative to the current `line_text`.
    #[serde(default)]
    pub ranges: Vec<HighlightRange>,
}

impl AddedLine {
    pub fn new(line_text: impl Into<String>, ranges: Vec<HighlightRange>) -> Self {
        Self {
            line_text: line_text.into(),
            ranges,
        }
    }

    /// A line without highlights.
    pub fn plain(line_text: impl Into<String>) -> Self {
        Self::new(line_text, Vec::new())
    }

    /// Length of `line_text` in chars.
    pub fn width(&self) -> usize {
        text::char_len(&self.line_text)
    }

    /// Check every range against the current text.
    ///
    /// `index` is the line's position in its block, used for error reporting.
    pub fn validate(&self, index: usize) -> Result<(), BlockError> {
        let len = self.width();
        for range in &self.ranges {
            if range.start > range.end || range.end > len {
                return Err(BlockError::RangeOutOfBounds {
                    line: index,
                    start: range.start,
                    end: range.end,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// Validate every line of a block.
pub fn validate_block(lines: &[AddedLine]) -> Result<(), BlockError> {
    lines
        .iter()
        .enumerate()
        .try_for_each(|(index, line)| line.validate(index))
}

/// Split plain text into highlight-free added lines.
///
/// A trailing line terminator does not produce an extra empty line.
pub fn lines_from_text(input: &str) -> Vec<AddedLine> {
    input
        .lines()
        .map(|line| AddedLine::plain(line.trim_end_matches('\r')))
        .collect()
}

// ---------------------------------------------------------------------------
// Indentation style
// ---------------------------------------------------------------------------

/// Dominant indentation unit of a block or document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentStyle {
    Space,
    Tab,
}

impl std::fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Space => write!(f, "space"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
