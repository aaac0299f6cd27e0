//! Indentation rewriter: stage 2 of the normalizer.
//!
//! Replaces each line's leading whitespace run with glyph units so that one
//! glyph is exactly one rendered column. Text after the run is untouched.
//!
//! - Space style: every leading whitespace char becomes one glyph.
//! - Tab style: every leading tab becomes `tab_width` glyphs, any other
//!   leading whitespace char becomes one glyph.
//!
//! Ranges stay relative to the rewritten text: an offset inside the run maps
//! to the expanded column of that char boundary, an offset past the run
//! shifts by the growth of the run.

use crate::block::text::leading_whitespace;
use crate::block::{AddedLine, HighlightRange, IndentStyle};
use crate::error::BlockError;

use super::ensure_glyph;

/// Widest tab the rewriter expands. Larger widths are rejected so the
/// expanded run stays a sane size.
pub const MAX_TAB_WIDTH: usize = 256;

/// Rewrite the leading whitespace of every line in the block.
///
/// `tab_width` must be in `1..=MAX_TAB_WIDTH`.
pub fn rewrite_indentation(
    lines: &[AddedLine],
    style: IndentStyle,
    tab_width: usize,
    glyph: char,
) -> Result<Vec<AddedLine>, BlockError> {
    if !(1..=MAX_TAB_WIDTH).contains(&tab_width) {
        return Err(BlockError::InvalidTabWidth(tab_width));
    }
    ensure_glyph(glyph)?;

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line.validate(index)?;
            Ok(rewrite_line(line, style, tab_width, glyph))
        })
        .collect()
}

fn rewrite_line(line: &AddedLine, style: IndentStyle, tab_width: usize, glyph: char) -> AddedLine {
    let run = leading_whitespace(&line.line_text);
    if run.is_empty() {
        return line.clone();
    }

    // columns[k] = rendered width of the first k chars of the run.
    let mut columns = Vec::with_capacity(run.len() + 1);
    columns.push(0usize);
    let mut width = 0usize;
    for c in run.chars() {
        width += match (style, c) {
            (IndentStyle::Tab, '\t') => tab_width,
            _ => 1,
        };
        columns.push(width);
    }
    let run_chars = columns.len() - 1;

    let rest = &line.line_text[run.len()..];
    let mut line_text = String::with_capacity(width * glyph.len_utf8() + rest.len());
    line_text.extend(std::iter::repeat_n(glyph, width));
    line_text.push_str(rest);

    let remap = |offset: usize| {
        if offset <= run_chars {
            columns[offset]
        } else {
            offset - run_chars + width
        }
    };
    let ranges = line
        .ranges
        .iter()
        .map(|r| HighlightRange::new(remap(r.start), remap(r.end)))
        .collect();

    AddedLine { line_text, ranges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
