//! Common-indent stripper: stage 3 of the normalizer.
//!
//! Removes the whitespace prefix shared by *every* line so the block's left
//! margin lands on column 0. Relative indentation between lines survives
//! because only the block-wide common part is removed.

use crate::block::text::{char_len, common_prefix, leading_whitespace};
use crate::block::{AddedLine, HighlightRange, validate_block};
use crate::error::BlockError;

/// Longest leading-whitespace prefix shared by all lines.
///
/// Folds a pairwise common prefix over each line's leading whitespace run.
/// A line with no leading whitespace ends the fold with `""`. An empty block
/// has no common indent.
pub fn common_indent(lines: &[AddedLine]) -> &str {
    let mut common: Option<&str> = None;
    for line in lines {
        let run = leading_whitespace(&line.line_text);
        if run.is_empty() {
            return "";
        }
        common = Some(match common {
            None => run,
            Some(prefix) => common_prefix(prefix, run),
        });
    }
    common.unwrap_or("")
}

/// Strip the common indent from every line and shift ranges left by its
/// length.
///
/// A range that starts inside the stripped prefix cannot be represented in
/// the new coordinates and is reported as [`BlockError::RangeUnderflow`].
pub fn strip_common_indent(lines: &[AddedLine]) -> Result<Vec<AddedLine>, BlockError> {
    validate_block(lines)?;

    let prefix = common_indent(lines);
    if prefix.is_empty() {
        return Ok(lines.to_vec());
    }
    let shift = char_len(prefix);

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let ranges = line
                .ranges
                .iter()
                .map(|range| shift_left(index, *range, shift))
                .collect::<Result<Vec<_>, _>>()?;
            let line_text = line
                .line_text
                .strip_prefix(prefix)
                .unwrap_or(&line.line_text)
                .to_string();
            Ok(AddedLine { line_text, ranges })
        })
        .collect()
}

fn shift_left(
    line: usize,
    range: HighlightRange,
    shift: usize,
) -> Result<HighlightRange, BlockError> {
    let underflow = || BlockError::RangeUnderflow {
        line,
        start: range.start,
        shift,
    };
    let start = range.start.checked_sub(shift).ok_or_else(underflow)?;
    let end = range.end.checked_sub(shift).ok_or_else(underflow)?;
    Ok(HighlightRange::new(start, end))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
