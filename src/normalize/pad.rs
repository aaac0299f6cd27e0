//! Right-padder: final stage of the normalizer.
//!
//! Appends glyph units so every line is as wide as the widest one. Padding
//! only adds trailing content, so ranges never move.

use crate::block::text::pad_end;
use crate::block::{AddedLine, validate_block};
use crate::error::BlockError;

use super::ensure_glyph;

/// Widest line of the block in chars (0 for an empty block).
pub fn max_width(lines: &[AddedLine]) -> usize {
    lines.iter().map(AddedLine::width).max().unwrap_or(0)
}

/// Pad every line on the right with `glyph` up to [`max_width`].
pub fn pad_trailing(lines: &[AddedLine], glyph: char) -> Result<Vec<AddedLine>, BlockError> {
    ensure_glyph(glyph)?;
    validate_block(lines)?;

    let width = max_width(lines);
    Ok(lines
        .iter()
        .map(|line| AddedLine {
            line_text: pad_end(&line.line_text, width, glyph),
            ranges: line.ranges.clone(),
        })
        .collect())
}
